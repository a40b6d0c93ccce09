use madcards_cli::commands::client::{run_client, ClientExit, MOVE_PROMPT};
use madcards_engine::logger::GameResult;
use madcards_server::{GameServer, ServerConfig};
use std::io::{BufReader, Cursor};
use std::net::TcpStream;
use std::time::Duration;

#[test]
fn scripted_session_sends_one_move_per_prompt() {
    let script = "\
Welcome to MadCards! Waiting for other players...
Your turn! Top card: |None| Your hand: [Card1 (RED), Card4 (BLUE)]
Invalid move! Card must match color or number of the top card.
Your turn! Top card: |Card7 (GREEN)| Your hand: [Card1 (RED), Card4 (BLUE)]
You drew a card.
Player 2 has won!
Game over!
";
    let mut server = Cursor::new(script);
    let mut to_server = Vec::new();
    let mut stdin = Cursor::new("play 1\n  draw  \nplay 0\n");
    let mut out = Vec::new();

    let exit = run_client(&mut server, &mut to_server, &mut stdin, &mut out).unwrap();

    assert_eq!(exit, ClientExit::ServerClosed);
    assert_eq!(String::from_utf8(to_server).unwrap(), "play 1\ndraw\n");

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches(MOVE_PROMPT).count(), 2);
    let echoed: Vec<_> = out
        .lines()
        .map(|l| l.trim_start_matches(MOVE_PROMPT))
        .filter(|l| l.starts_with("Server: "))
        .collect();
    assert_eq!(echoed.len(), 7);
    assert_eq!(echoed[6], "Server: Game over!");
}

#[test]
fn clients_follow_a_live_game_until_shutdown() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handle = runtime.block_on(async {
        GameServer::new(ServerConfig::for_tests(2))
            .unwrap()
            .start()
            .await
            .unwrap()
    });
    let addr = handle.address();

    // Connect in order so seat numbers are predictable.
    let mut seats = Vec::new();
    for _ in 0..2 {
        let stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut first = String::new();
        std::io::BufRead::read_line(&mut reader, &mut first).unwrap();
        assert_eq!(first.trim_end(), "Welcome to MadCards! Waiting for other players...");
        seats.push((reader, stream));
    }

    let play = |(mut reader, mut writer): (BufReader<TcpStream>, TcpStream), input: &'static str| {
        std::thread::spawn(move || {
            let mut stdin = Cursor::new(input);
            let mut out = Vec::new();
            let exit = run_client(&mut reader, &mut writer, &mut stdin, &mut out).unwrap();
            (exit, String::from_utf8(out).unwrap())
        })
    };
    let second = play(seats.pop().unwrap(), "draw\n");
    let first = play(seats.pop().unwrap(), "draw\n");

    // Player 1 draws, player 2 draws, then player 1 runs out of input.
    let (exit, out) = first.join().unwrap();
    assert_eq!(exit, ClientExit::InputClosed);
    assert_eq!(out.matches("Server: Your turn!").count(), 2);
    assert!(out.contains("Server: You drew a card."));

    let record = runtime
        .block_on(handle.shutdown())
        .unwrap()
        .expect("game was running");
    assert_eq!(record.result, GameResult::Abandoned);
    assert_eq!(record.turns.len(), 2);

    let (exit, out) = second.join().unwrap();
    assert_eq!(exit, ClientExit::ServerClosed);
    assert_eq!(out.matches("Server: Your turn!").count(), 1);
    assert!(out.contains("Server: You drew a card."));
    assert!(out.trim_end().ends_with("Server: Game over!"));
}
