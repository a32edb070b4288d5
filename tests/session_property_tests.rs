use std::collections::HashSet;

use decodec::{
    Direction, ReconciliationSession, Sentence, SessionOptions, decode, encode, normalize,
    validate_complete,
};
use proptest::prelude::*;

const SOURCE_WORDS: [&str; 4] = ["uno", "dos", "tres", "cuatro"];
const TARGET_WORDS: [&str; 6] = ["eins", "zwei", "drei", "vier", "fünf", "sechs"];
const REPEATING_WORDS: [&str; 6] = ["die", "Die", "Katze", "sieht", "Maus,", "maus."];

#[derive(Debug, Clone)]
enum Op {
    Assign(usize, usize),
    Unassign(usize, usize),
    Reorder(usize, usize, bool),
    Resync(Vec<usize>),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let source = 0..SOURCE_WORDS.len();
    let target = 0..TARGET_WORDS.len();
    prop_oneof![
        6 => (source.clone(), target.clone()).prop_map(|(s, t)| Op::Assign(s, t)),
        2 => (source.clone(), target.clone()).prop_map(|(s, t)| Op::Unassign(s, t)),
        2 => (source, target.clone(), any::<bool>()).prop_map(|(s, t, d)| Op::Reorder(s, t, d)),
        1 => prop::collection::vec(target, 1..6).prop_map(Op::Resync),
        1 => Just(Op::Clear),
    ]
}

fn new_session() -> ReconciliationSession {
    ReconciliationSession::new(
        &SOURCE_WORDS.join(" "),
        &TARGET_WORDS.join(" "),
        SessionOptions::default(),
    )
}

fn apply(session: &mut ReconciliationSession, op: &Op) {
    match op {
        Op::Assign(s, t) => {
            let _ = session.assign(SOURCE_WORDS[*s], TARGET_WORDS[*t]);
        }
        Op::Unassign(s, t) => {
            let _ = session.unassign(SOURCE_WORDS[*s], TARGET_WORDS[*t]);
        }
        Op::Reorder(s, t, earlier) => {
            let direction = if *earlier {
                Direction::Earlier
            } else {
                Direction::Later
            };
            let _ = session.reorder(SOURCE_WORDS[*s], TARGET_WORDS[*t], direction);
        }
        Op::Resync(words) => {
            let text = words
                .iter()
                .map(|i| TARGET_WORDS[*i])
                .collect::<Vec<_>>()
                .join(" ");
            session.resync_from_new_translation(&text);
        }
        Op::Clear => session.clear(),
    }
}

fn assert_no_double_assignment(session: &ReconciliationSession) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for entry in session.entries() {
        for word in &entry.target_words {
            prop_assert!(
                seen.insert(normalize(word)),
                "`{}` assigned twice: {:?}",
                word,
                session.entries()
            );
        }
    }
    Ok(())
}

fn assert_reading_order(
    session: &ReconciliationSession,
    words: &[String],
) -> Result<(), TestCaseError> {
    let order: Vec<usize> = words
        .iter()
        .map(|w| {
            session
                .target_words()
                .iter()
                .position(|t| t == w)
                .unwrap_or(usize::MAX)
        })
        .collect();
    prop_assert!(
        order.windows(2).all(|pair| pair[0] < pair[1]),
        "not in reading order: {:?}",
        words
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn no_target_word_is_ever_assigned_twice(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut session = new_session();
        for op in &ops {
            apply(&mut session, op);
            assert_no_double_assignment(&session)?;
        }
    }

    #[test]
    fn available_words_follow_reading_order(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut session = new_session();
        for op in &ops {
            apply(&mut session, op);
        }
        assert_reading_order(&session, &session.available_target_words(None))?;
        for source in SOURCE_WORDS {
            assert_reading_order(&session, &session.available_target_words(Some(source)))?;
        }
    }

    #[test]
    fn pool_and_assignments_partition_the_translation(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut session = new_session();
        for op in &ops {
            apply(&mut session, op);
        }
        let assigned: usize = session.entries().iter().map(|e| e.target_words.len()).sum();
        prop_assert_eq!(assigned + session.unassigned_pool().len(), session.target_words().len());
    }

    #[test]
    fn unassign_then_assign_moves_word_to_end(
        owners in prop::collection::vec(0..SOURCE_WORDS.len(), TARGET_WORDS.len()),
        pick in 0..TARGET_WORDS.len(),
    ) {
        let mut session = new_session();
        for (target, source) in owners.iter().enumerate() {
            session.assign(SOURCE_WORDS[*source], TARGET_WORDS[target]).unwrap();
        }
        let source = SOURCE_WORDS[owners[pick]];
        let target = TARGET_WORDS[pick];

        session.unassign(source, target).unwrap();
        session.assign(source, target).unwrap();
        let words = session.assigned_words(source).unwrap();
        prop_assert_eq!(words.last().map(String::as_str), Some(target));
    }

    #[test]
    fn complete_sessions_roundtrip_through_encoding(
        owners in prop::collection::vec(0..SOURCE_WORDS.len(), TARGET_WORDS.len()),
        ops in prop::collection::vec(op_strategy(), 0..10),
    ) {
        let mut session = new_session();
        for (target, source) in owners.iter().enumerate() {
            session.assign(SOURCE_WORDS[*source], TARGET_WORDS[target]).unwrap();
        }
        for op in ops.iter().filter(|op| matches!(op, Op::Assign(..) | Op::Reorder(..))) {
            apply(&mut session, op);
        }

        let result = validate_complete(&session);
        let every_source_used = session.entries().iter().all(|e| !e.is_empty());
        prop_assert_eq!(result.is_valid(), every_source_used);

        if result.is_valid() {
            let encoded = encode(&session);
            let mut sentence = Sentence::new(SOURCE_WORDS.join(" "), TARGET_WORDS.join(" "));
            sentence.word_alignments = encoded.clone();

            let decoded = decode(&sentence, SessionOptions::default()).unwrap();
            prop_assert!(validate_complete(&decoded).is_valid());
            prop_assert_eq!(encode(&decoded), encoded);
        }
    }

    #[test]
    fn fresh_and_decoded_sessions_share_source_keys(
        picks in prop::collection::vec(0..REPEATING_WORDS.len(), 1..12),
    ) {
        let source = picks.iter().map(|i| REPEATING_WORDS[*i]).collect::<Vec<_>>().join(" ");
        let natural = TARGET_WORDS.join(" ");
        let fresh = ReconciliationSession::new(&source, &natural, SessionOptions::default());
        let decoded = decode(&Sentence::new(source.clone(), natural), SessionOptions::default()).unwrap();
        prop_assert_eq!(decoded.source_words(), fresh.source_words());

        // Keys appear in order of first occurrence in the source sentence.
        let mut first_seen: Vec<String> = Vec::new();
        for i in &picks {
            let key = normalize(REPEATING_WORDS[*i]);
            if !first_seen.contains(&key) {
                first_seen.push(key);
            }
        }
        let keys: Vec<String> = decoded.source_words().iter().map(|w| normalize(w)).collect();
        prop_assert_eq!(keys, first_seen);
    }
}
