//! End-to-end pipeline scenarios: raw comment text in, reply text (or
//! silence) out.

use cutoffbot::{Classification, IncomingItem, IntentClassifier, Pipeline};

fn pipeline() -> Pipeline {
    Pipeline::builtin()
}

#[test]
fn bare_command_renders_all_campuses_and_branches() {
    let reply = pipeline()
        .handle(&IncomingItem::new("aspirant", "!cutoff"))
        .expect("bare command must reply");
    for campus in ["PILANI CAMPUS", "GOA CAMPUS", "HYDERABAD CAMPUS"] {
        assert!(reply.contains(campus), "missing {campus}");
    }
    // A spot check per campus.
    assert!(reply.contains("CSE: 327/390"));
    assert!(reply.contains("CSE: 301/390"));
    assert!(reply.contains("CSE: 298/390"));
    // Manufacturing exists only at Pilani.
    assert_eq!(reply.matches("MANUFACTURING").count(), 1);
}

#[test]
fn command_with_branch_spans_all_campuses() {
    let reply = pipeline()
        .handle(&IncomingItem::new("aspirant", "!cutoff for CSE"))
        .expect("branch command must reply");
    assert!(reply.contains("CSE CUTOFFS ACROSS CAMPUSES"));
    assert!(reply.contains("327/390"));
    assert!(reply.contains("301/390"));
    assert!(reply.contains("298/390"));
    assert!(!reply.contains("MECHANICAL"));
}

#[test]
fn command_with_branch_and_campus_is_a_single_entry() {
    let reply = pipeline()
        .handle(&IncomingItem::new("aspirant", "!cutoff for mechanical in Pilani"))
        .expect("specific command must reply");
    assert!(reply.contains("MECHANICAL: **266/390**"));
    assert!(!reply.contains("GOA"));
    assert!(!reply.contains("HYDERABAD"));
}

#[test]
fn natural_language_question_matches_command_form() {
    let p = pipeline();
    let command = p
        .handle(&IncomingItem::new("aspirant", "!cutoff for CSE"))
        .unwrap();
    let question = p
        .handle(&IncomingItem::new("aspirant", "What is the cutoff for CSE?"))
        .unwrap();
    assert_eq!(command, question);
}

#[test]
fn generic_chatter_gets_no_reply() {
    let p = pipeline();
    for text in [
        "BITSAT prep tips?",
        "pilani is so pretty in winter",
        "scored 290 in my mock today",
        "cutoffs were brutal last year lol",
    ] {
        assert!(
            p.handle(&IncomingItem::new("aspirant", text)).is_none(),
            "must ignore: {text:?}"
        );
    }
}

#[test]
fn bot_authors_never_get_replies() {
    let p = pipeline();
    let item = IncomingItem::new("AutoModerator", "!cutoff").from_bot();
    assert!(p.handle(&item).is_none());

    // The classifier, asked directly, must ignore regardless of text.
    let classifier = IntentClassifier::new(std::sync::Arc::new(
        cutoffbot::AliasTable::builtin(),
    ));
    for text in ["!cutoff", "What is the cutoff for CSE?", "anything"] {
        let item = IncomingItem::new("SomeBot", text).from_bot();
        assert_eq!(classifier.classify(&item), Classification::Ignore);
    }
}

#[test]
fn unknown_command_keyword_is_silent() {
    let p = pipeline();
    assert!(p.handle(&IncomingItem::new("aspirant", "!help")).is_none());
    assert!(p.handle(&IncomingItem::new("aspirant", "!cutofff cse")).is_none());
}

#[test]
fn absent_pairing_renders_no_data() {
    let reply = pipeline()
        .handle(&IncomingItem::new("aspirant", "!cutoff for civil in goa"))
        .expect("valid shape must reply");
    assert!(reply.contains("no data for CIVIL at GOA"));
}

#[test]
fn multi_branch_query_takes_the_first_mention() {
    let p = pipeline();
    let reply = p
        .handle(&IncomingItem::new("aspirant", "!cutoff for CSE and ECE"))
        .unwrap();
    assert!(reply.contains("CSE CUTOFFS ACROSS CAMPUSES"));
    assert!(!reply.contains("ECE CUTOFFS"));

    let reply = p
        .handle(&IncomingItem::new("aspirant", "!cutoff for ECE and CSE"))
        .unwrap();
    assert!(reply.contains("ECE CUTOFFS ACROSS CAMPUSES"));
}

#[test]
fn replies_are_byte_identical_for_identical_input() {
    let p = pipeline();
    let item = IncomingItem::new("fixed_author", "kitne marks chahiye for cse in goa?");
    let first = p.handle(&item).expect("hinglish question must reply");
    assert!(first.contains("**301/390**"));
    for _ in 0..5 {
        assert_eq!(p.handle(&item).unwrap(), first);
    }
}

#[test]
fn every_table_entry_round_trips_through_text() {
    let p = pipeline();
    let table = cutoffbot::CutoffTable::builtin();
    for entry in table.entries() {
        let text = format!(
            "!cutoff for {} in {}",
            entry.branch.display_name().to_lowercase(),
            entry.campus.display_name().to_lowercase()
        );
        let reply = p
            .handle(&IncomingItem::new("aspirant", &text))
            .unwrap_or_else(|| panic!("no reply for {text:?}"));
        let expected = format!("**{}/{}**", entry.score, entry.max_score);
        assert!(reply.contains(&expected), "{text:?} missing {expected}");
    }
}

#[test]
fn adversarial_input_never_panics() {
    let p = pipeline();
    let cases = [
        String::new(),
        " ".repeat(10_000),
        "!".repeat(5_000),
        "!cutoff ".repeat(2_000),
        "\u{0}\u{1}\u{2} \u{1f480}".repeat(3_000),
        "what is the cutoff for ".repeat(1_000) + "cse?",
    ];
    for text in cases {
        let _ = p.handle(&IncomingItem::new("aspirant", &text));
    }
}
