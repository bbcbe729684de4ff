use keepnote_core::{
    category_counts, filter_notes, Category, CategoryFilter, Note, ViewQuery,
};

#[test]
fn default_query_returns_every_note_in_canonical_order() {
    let notes = sample_notes();
    let visible = filter_notes(&notes, &ViewQuery::default());

    assert_eq!(visible.len(), notes.len());
    let titles: Vec<_> = visible.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Buy groceries",
            "Quarterly report",
            "Call plumber",
            "Groceries budget",
        ]
    );
}

#[test]
fn search_is_case_insensitive_over_title_and_content() {
    let notes = sample_notes();
    let query = ViewQuery {
        search_term: "EGGS".to_string(),
        ..ViewQuery::default()
    };

    let titles: Vec<_> = filter_notes(&notes, &query)
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    // Matches content of the first and fourth note.
    assert_eq!(titles, vec!["Buy groceries", "Groceries budget"]);
}

#[test]
fn category_pick_narrows_without_reordering() {
    let notes = sample_notes();
    let query = ViewQuery {
        category: CategoryFilter::Only(Category::Work),
        ..ViewQuery::default()
    };

    let titles: Vec<_> = filter_notes(&notes, &query)
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Quarterly report", "Groceries budget"]);
}

#[test]
fn search_and_category_combine_as_and() {
    let notes = sample_notes();
    let query = ViewQuery {
        search_term: "groceries".to_string(),
        category: CategoryFilter::Only(Category::Work),
    };

    let titles: Vec<_> = filter_notes(&notes, &query)
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Groceries budget"]);
}

#[test]
fn term_and_category_each_single_out_their_note() {
    let milk = note("Buy milk", "", Category::Personal);
    let report = note("Ship report", "", Category::Work);
    let notes = vec![milk.clone(), report.clone()];

    let by_term = ViewQuery {
        search_term: "milk".to_string(),
        ..ViewQuery::default()
    };
    assert_eq!(filter_notes(&notes, &by_term), vec![&milk]);

    let by_category = ViewQuery {
        category: CategoryFilter::Only(Category::Work),
        ..ViewQuery::default()
    };
    assert_eq!(filter_notes(&notes, &by_category), vec![&report]);

    let by_missing_term = ViewQuery {
        search_term: "xyz".to_string(),
        ..ViewQuery::default()
    };
    assert!(filter_notes(&notes, &by_missing_term).is_empty());
}

#[test]
fn search_term_is_not_trimmed() {
    let spaced = Note::new("two words", "", Category::Personal).unwrap();
    let solo = Note::new("single", "solo", Category::Personal).unwrap();
    let notes = vec![spaced, solo];

    let query = ViewQuery {
        search_term: " ".to_string(),
        ..ViewQuery::default()
    };

    let titles: Vec<_> = filter_notes(&notes, &query)
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["two words"]);
}

#[test]
fn unmatched_query_yields_empty_view_while_counts_hold() {
    let notes = sample_notes();
    let query = ViewQuery {
        search_term: "zzz".to_string(),
        ..ViewQuery::default()
    };

    assert!(filter_notes(&notes, &query).is_empty());
    assert_eq!(category_counts(&notes).total, notes.len());
}

#[test]
fn completion_state_does_not_affect_visibility() {
    let mut notes = sample_notes();
    notes[0].completed = true;

    let visible = filter_notes(&notes, &ViewQuery::default());
    assert_eq!(visible.len(), notes.len());
}

#[test]
fn counts_are_derived_from_the_unfiltered_collection() {
    let notes = sample_notes();
    let counts = category_counts(&notes);

    assert_eq!(counts.total, 4);
    assert_eq!(counts.personal, 1);
    assert_eq!(counts.work, 2);
    assert_eq!(counts.urgent, 1);
    assert_eq!(counts.total, counts.personal + counts.work + counts.urgent);

    assert_eq!(counts.get(CategoryFilter::All), 4);
    assert_eq!(counts.get(CategoryFilter::Only(Category::Work)), 2);
    assert_eq!(counts.get(CategoryFilter::Only(Category::Urgent)), 1);
}

#[test]
fn counts_of_empty_collection_are_zero() {
    let counts = category_counts(&[]);
    assert_eq!(counts, keepnote_core::CategoryCounts::default());
}

#[test]
fn only_the_default_query_is_unfiltered() {
    assert!(ViewQuery::default().is_unfiltered());

    let searched = ViewQuery {
        search_term: " ".to_string(),
        ..ViewQuery::default()
    };
    assert!(!searched.is_unfiltered());

    let narrowed = ViewQuery {
        category: CategoryFilter::Only(Category::Personal),
        ..ViewQuery::default()
    };
    assert!(!narrowed.is_unfiltered());
}

#[test]
fn category_filter_parses_ui_tokens() {
    assert_eq!(CategoryFilter::parse("all"), Some(CategoryFilter::All));
    assert_eq!(
        CategoryFilter::parse("urgent"),
        Some(CategoryFilter::Only(Category::Urgent))
    );
    assert_eq!(CategoryFilter::parse("All"), None);
    assert_eq!(CategoryFilter::parse("misc"), None);
}

fn sample_notes() -> Vec<Note> {
    vec![
        note("Buy groceries", "milk and EGGS", Category::Personal),
        note("Quarterly report", "draft for review", Category::Work),
        note("Call plumber", "kitchen sink leaks", Category::Urgent),
        note("Groceries budget", "eggs got expensive", Category::Work),
    ]
}

fn note(title: &str, content: &str, category: Category) -> Note {
    Note::new(title, content, category).unwrap()
}
