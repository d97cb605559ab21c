//! Property-based tests for the line classifier and the move checker.

use proptest::prelude::*;

use strictly_fibs::{EventKind, MoveStatus, Position, Side, check_move, parse_line};

/// Strategy: words the server actually uses, mixed with numbers and noise.
fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "rolls", "moves", "and", "wins", "a", "an", "point", "match", "match.", "with",
            "you.", "wants", "to", "play", "has", "saved", "games.", "start", "are", "resuming",
            "their", "**", "-", "bar-22", "3-off", "8-5", "YES", "NO", "allowpip", "boardstyle:",
            "unlimited", "the", "game", "gets", "points.", "doubles.", "can't", "move.",
        ])
        .prop_map(str::to_string),
        (0u32..30).prop_map(|n| n.to_string()),
        "[a-zA-Z0-9.'*:-]{1,8}",
    ]
}

/// Strategy: a line of one to twelve plausible words.
fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 0..12).prop_map(|words| words.join(" "))
}

/// Strategy: a colon-separated board dump of small integers.
fn board_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(-3i32..=30, 40..60).prop_map(|fields| {
        let body: Vec<String> = fields.iter().map(ToString::to_string).collect();
        format!("board:a:b:{}", body.join(":"))
    })
}

proptest! {
    // 1. Arbitrary text never crashes the classifier
    #[test]
    fn arbitrary_text_decodes(raw in ".*") {
        let event = parse_line(&raw);
        prop_assert!(event.conforms(), "{} does not conform", event);
    }

    // 2. Decoding is idempotent
    #[test]
    fn decoding_is_idempotent(raw in line_strategy()) {
        prop_assert_eq!(parse_line(&raw), parse_line(&raw));
    }

    // 3. Every decoded event follows its schema
    #[test]
    fn decoded_events_conform(raw in line_strategy()) {
        let event = parse_line(&raw);
        prop_assert!(event.conforms(), "{} from {:?}", event, raw);
        if event.kind() == EventKind::Unrecognized {
            prop_assert_eq!(event.tokens().len(), 1);
        }
    }

    // 4. Board-like noise is either a board or rejected, never a panic
    #[test]
    fn board_noise_is_contained(raw in board_strategy()) {
        let event = parse_line(&raw);
        prop_assert!(matches!(
            event.kind(),
            EventKind::Board | EventKind::BoardMalformed | EventKind::Unrecognized
        ));
        prop_assert!(event.conforms());
    }

    // 5. The move checker never plays more than four half-moves
    #[test]
    fn move_check_is_bounded(
        before in prop::array::uniform24(-2..=2i32),
        after in prop::array::uniform24(-2..=2i32),
        die1 in 1..=6i32,
        die2 in 1..=6i32,
    ) {
        let mut start = Position::new();
        start.set_points(before);
        start.set_dice(die1, die2);
        let mut end = Position::new();
        end.set_points(after);

        let checked = check_move(&start, &end, Side::White);
        prop_assert!(checked.movements().len() <= 4);
        if checked.status() == MoveStatus::TooManyOrigins {
            prop_assert!(checked.movements().is_empty());
        }
    }
}
