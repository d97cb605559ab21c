//! Tests for decoding CLIP status lines into events.

use strictly_fibs::{
    Category, Classifier, DecodeErrorKind, Event, EventKind, Line, Token, classify, decode_line,
    parse_line,
};

fn id(value: &str) -> Token {
    Token::identifier(value)
}

fn text(value: &str) -> Token {
    Token::text(value)
}

fn decoded(raw: &str) -> Event {
    let event = parse_line(raw);
    assert!(event.conforms(), "{} does not follow its schema", event);
    event
}

#[test]
fn test_welcome() {
    assert_eq!(
        decoded("1 guido 1234567890 foobar"),
        Event::new(
            EventKind::Welcome,
            vec![id("guido"), Token::Timestamp(1234567890), text("foobar")]
        )
    );
}

#[test]
fn test_welcome_timestamp_as_date() {
    let event = decoded("1 guido 1234567890 foobar");
    let mut reader = event.reader();
    assert_eq!(reader.next_identifier(), Ok("guido"));
    let date = reader.next_datetime().unwrap();
    assert_eq!(date.to_rfc3339(), "2009-02-13T23:31:30+00:00");
    assert_eq!(reader.next_text(), Ok("foobar"));
    assert!(reader.finish().is_ok());
}

#[test]
fn test_motd_markers() {
    assert_eq!(decoded("3"), Event::bare(EventKind::Motd));
    assert_eq!(decoded("4"), Event::bare(EventKind::MotdEnd));
    assert_eq!(decoded("6"), Event::bare(EventKind::WhoInfoEnd));
    assert_eq!(parse_line("3 extra").kind(), EventKind::Unrecognized);
}

#[test]
fn test_message_keeps_text() {
    assert_eq!(
        decoded("9 gflohr 1286550245 see you  tomorrow"),
        Event::new(
            EventKind::Message,
            vec![
                id("gflohr"),
                Token::Timestamp(1286550245),
                text("see you  tomorrow")
            ]
        )
    );
}

#[test]
fn test_logout() {
    assert_eq!(
        decoded("8 gflohr gflohr drops connection."),
        Event::new(
            EventKind::Logout,
            vec![id("gflohr"), text("gflohr drops connection")]
        )
    );
}

#[test]
fn test_chat_codes() {
    let kinds = [
        ("12", EventKind::Says),
        ("13", EventKind::Shouts),
        ("14", EventKind::Whispers),
        ("15", EventKind::Kibitzes),
        ("16", EventKind::YouSay),
    ];
    for (code, kind) in kinds {
        let event = decoded(&format!("{} joe nice roll", code));
        assert_eq!(event, Event::new(kind, vec![id("joe"), text("nice roll")]));
    }
    assert_eq!(
        decoded("19 nice roll"),
        Event::new(EventKind::YouKibitz, vec![text("nice roll")])
    );
}

#[test]
fn test_message_delivered() {
    assert_eq!(
        decoded("10 gflohr"),
        Event::new(EventKind::MessageDelivered, vec![id("gflohr")])
    );
}

#[test]
fn test_unused_code_is_unrecognized() {
    assert_eq!(parse_line("99 whatever").kind(), EventKind::Unrecognized);
    let error = decode_line("0 whatever").unwrap_err();
    assert_eq!(error.kind, DecodeErrorKind::UnknownCode(0));
}

#[test]
fn test_rolls() {
    assert_eq!(
        decoded("JoeBlack rolls 3 and 4."),
        Event::new(
            EventKind::Rolls,
            vec![id("JoeBlack"), Token::Unsigned(3), Token::Unsigned(4)]
        )
    );
}

#[test]
fn test_rolls_out_of_range() {
    let error = decode_line("JoeBlack rolls 3 and 7.").unwrap_err();
    assert_eq!(
        error.kind,
        DecodeErrorKind::OutOfRange {
            field: "die",
            value: 7
        }
    );
}

#[test]
fn test_failed_decoder_is_not_retried() {
    // The line has five tokens, so the saved game rule would accept its
    // shape, but the rolls rule claimed it first.
    let raw = "JoeBlack rolls 3 and 7.";
    assert_eq!(classify(&raw.split_whitespace().collect::<Vec<_>>()), Category::Rolls);
    assert_eq!(parse_line(raw), Event::unrecognized(raw));
}

#[test]
fn test_moves() {
    assert_eq!(
        decoded("JoeBlack moves bar-22 22-off ."),
        Event::new(
            EventKind::Moves,
            vec![
                id("JoeBlack"),
                Token::Unsigned(2),
                Token::Unsigned(25),
                Token::Unsigned(22),
                Token::Unsigned(22),
                Token::Unsigned(25),
            ]
        )
    );
    assert_eq!(parse_line("JoeBlack moves 13-5 .").kind(), EventKind::Unrecognized);
}

#[test]
fn test_start_and_resume_match() {
    assert_eq!(
        decoded("JoeBlack and JaneDoe start a 7 point match."),
        Event::new(
            EventKind::StartMatch,
            vec![id("JoeBlack"), id("JaneDoe"), Token::Unsigned(7)]
        )
    );
    assert_eq!(
        decoded("JoeBlack and JaneDoe are resuming their unlimited match."),
        Event::new(
            EventKind::ResumeMatch,
            vec![id("JoeBlack"), id("JaneDoe"), Token::Unsigned(0)]
        )
    );
}

#[test]
fn test_win_match() {
    assert_eq!(
        decoded("JoeBlack wins a 3 point match against JaneDoe 3-1 ."),
        Event::new(
            EventKind::WinMatch,
            vec![
                id("JoeBlack"),
                id("JaneDoe"),
                Token::Unsigned(3),
                Token::Unsigned(3),
                Token::Unsigned(1),
            ]
        )
    );
}

#[test]
fn test_invitation() {
    assert_eq!(
        decoded("JoeBlack wants to play a 5 point match with you."),
        Event::new(EventKind::Invitation, vec![id("JoeBlack"), Token::Unsigned(5)])
    );
    assert_eq!(
        decoded("JoeBlack wants to play an unlimited match with you."),
        Event::new(EventKind::Invitation, vec![id("JoeBlack"), Token::Unsigned(0)])
    );
}

#[test]
fn test_game_flow_records() {
    assert_eq!(
        decoded("JoeBlack doubles. Type 'accept' or 'reject'."),
        Event::new(EventKind::Doubles, vec![id("JoeBlack")])
    );
    assert_eq!(
        decoded("JoeBlack accepts the double. The cube shows 2."),
        Event::new(EventKind::AcceptsDouble, vec![id("JoeBlack")])
    );
    assert_eq!(
        decoded("JoeBlack can't move."),
        Event::new(EventKind::CannotMove, vec![id("JoeBlack")])
    );
    assert_eq!(
        decoded("JoeBlack wants to resign. You will win 2 points. Type 'accept' or 'reject'."),
        Event::new(EventKind::Resigns, vec![id("JoeBlack"), Token::Unsigned(2)])
    );
    assert_eq!(
        decoded("JoeBlack rejects. The game continues."),
        Event::new(EventKind::RejectsResignation, vec![id("JoeBlack")])
    );
}

#[test]
fn test_setting_and_toggle_echoes() {
    assert_eq!(
        decoded("boardstyle: 3"),
        Event::new(EventKind::ShowSetting, vec![text("boardstyle"), text("3")])
    );
    assert_eq!(
        decoded("autodouble NO"),
        Event::new(
            EventKind::ShowToggle,
            vec![text("autodouble"), Token::Boolean(false)]
        )
    );
    assert_eq!(decoded("Settings of variables:"), Event::bare(EventKind::StartSettings));
    assert_eq!(decoded("The current settings are:"), Event::bare(EventKind::StartToggles));
}

#[test]
fn test_saved_games_listing() {
    assert_eq!(
        decoded("opponent matchlength score (user's points first)"),
        Event::bare(EventKind::ShowStartSaved)
    );
    assert_eq!(
        decoded("  *JaneDoe 5 2 - 1"),
        Event::new(
            EventKind::ShowSaved,
            vec![
                id("JaneDoe"),
                Token::Unsigned(5),
                Token::Unsigned(2),
                Token::Unsigned(1),
            ]
        )
    );
    assert_eq!(decoded("no saved games."), Event::bare(EventKind::ShowSavedNone));
    assert_eq!(
        decoded("JoeBlack has 2 saved games."),
        Event::new(EventKind::ShowSavedCount, vec![id("JoeBlack"), Token::Unsigned(2)])
    );
}

#[test]
fn test_address_echoes() {
    assert_eq!(
        decoded("Your email address is 'joe@example.com'."),
        Event::new(EventKind::ShowAddress, vec![text("joe@example.com")])
    );
    assert_eq!(
        decoded("** 'joe' is not an email address."),
        Event::new(EventKind::ErrorNoEmailAddress, vec![text("joe")])
    );
}

#[test]
fn test_watching() {
    assert_eq!(
        decoded("You're now watching JoeBlack."),
        Event::new(EventKind::YoureWatching, vec![id("JoeBlack")])
    );
}

#[test]
fn test_empty_and_unrecognized() {
    assert_eq!(parse_line(""), Event::bare(EventKind::Empty));
    assert_eq!(
        parse_line("Please type 'help' for help."),
        Event::unrecognized("Please type 'help' for help.")
    );
}

#[test]
fn test_decoding_is_idempotent() {
    let lines = [
        "1 guido 1234567890 foobar",
        "JoeBlack rolls 3 and 4.",
        "JoeBlack moves 8-5 6-5 .",
        "something else entirely",
    ];
    for raw in lines {
        assert_eq!(parse_line(raw), parse_line(raw));
    }
}

#[test]
fn test_classifier_reports_categories() {
    let classifier = Classifier::default();
    let cases = [
        ("1 guido 1234567890 foobar", Category::Code),
        ("board:You:someone:3", Category::Board),
        ("allowpip YES", Category::Toggle),
        ("JoeBlack moves 8-5 6-5 .", Category::Moves),
        ("JaneDoe 5 2 - 1", Category::SavedMatch),
        ("", Category::Empty),
        ("what is this", Category::Unrecognized),
    ];
    for (raw, category) in cases {
        assert_eq!(classifier.classify(&Line::new(raw)), category, "{}", raw);
    }
}
