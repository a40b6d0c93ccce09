use serial_test::serial;

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = madcards_cli::run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn count_after(text: &str, prefix: &str) -> usize {
    text.lines()
        .find_map(|l| l.strip_prefix(prefix))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("no line starting with {prefix:?} in:\n{text}"))
}

#[test]
#[serial]
fn seeded_simulation_is_reproducible() {
    let args = ["madcards", "sim", "--players", "3", "--games", "5", "--seed", "42"];
    let (code_a, out_a, err_a) = run(&args);
    let (code_b, out_b, _) = run(&args);

    assert_eq!(code_a, 0, "stderr: {err_a}");
    assert_eq!(code_b, 0);
    assert_eq!(out_a, out_b);
    assert!(out_a.starts_with("Simulated: 5 games (3 players, baseline bots, seed 42)"));
}

#[test]
#[serial]
fn every_game_is_either_won_or_a_stalemate() {
    let (code, out, err) = run(&[
        "madcards", "sim", "--players", "4", "--games", "20", "--seed", "7", "--bot", "random",
    ]);
    assert_eq!(code, 0, "stderr: {err}");

    let wins: usize = (1..=4)
        .map(|p| count_after(&out, &format!("Player {p} wins: ")))
        .sum();
    let stalemates = count_after(&out, "Stalemates: ");
    assert_eq!(wins + stalemates, 20, "{out}");
}

#[test]
#[serial]
fn output_file_gets_one_record_per_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("games.jsonl");
    let path_str = path.to_str().unwrap();

    let (code, _, err) = run(&[
        "madcards", "sim", "--players", "2", "--games", "3", "--seed", "100", "--output", path_str,
    ]);
    assert_eq!(code, 0, "stderr: {err}");

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 3);

    for (i, rec) in records.iter().enumerate() {
        let id = rec["game_id"].as_str().unwrap();
        assert!(id.ends_with(&format!("-{:06}", i + 1)), "{id}");
        assert_eq!(rec["seed"], 100 + i as u64);
        assert_eq!(rec["players"], 2);
        assert_eq!(rec["meta"]["bot"], "baseline");
        assert!(rec["ts"].is_string());

        let turns = rec["turns"].as_array().unwrap();
        match rec["result"]["kind"].as_str().unwrap() {
            "won" => {
                let last = turns.last().expect("a won game has turns");
                assert_eq!(last["player_id"], rec["result"]["winner"]);
                assert_eq!(last["outcome"]["kind"], "played");
                assert_eq!(rec["meta"]["stalemate"], false);
            }
            "abandoned" => assert_eq!(rec["meta"]["stalemate"], true),
            other => panic!("unexpected result kind {other}"),
        }
        for (n, turn) in turns.iter().enumerate() {
            assert_eq!(turn["turn"], n as u64 + 1);
            assert_eq!(turn["madness"], n as u64 + 1);
        }
    }
}

#[test]
#[serial]
fn zero_games_is_an_error() {
    let (code, out, err) = run(&["madcards", "sim", "--games", "0"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("games must be >= 1"));
}

#[test]
#[serial]
fn unknown_bot_is_an_error() {
    let (code, _, err) = run(&["madcards", "sim", "--bot", "genius"]);
    assert_eq!(code, 2);
    assert!(err.contains("Unknown bot type: genius"), "stderr: {err}");
}

#[test]
#[serial]
fn break_after_reports_interruption() {
    // SAFETY: tests touching the environment are serialized
    unsafe { std::env::set_var("MADCARDS_SIM_BREAK_AFTER", "2") };
    let (code, out, _) = run(&["madcards", "sim", "--games", "5", "--seed", "3"]);
    unsafe { std::env::remove_var("MADCARDS_SIM_BREAK_AFTER") };

    assert_eq!(code, 130);
    assert!(out.contains("Interrupted: played 2/5"), "{out}");
}
