//! Invariants that hold for every comparison.

use docdiff::diff::{tokenize, OpTag, SequenceMatcher};
use docdiff::identity::{annotation_key, fallback_key};
use docdiff::report::ChangeRecord;
use docdiff::{
    detect, Annotation, Cell, ChangeReport, ChangeType, Document, Image, Page, Paragraph,
    PdfContent, Run, Sheet, SheetContent, Table, WordContent,
};

fn sample_word() -> Document {
    let mut body = WordContent::new();
    body.add_paragraph(
        Paragraph::new(0, "Agreement")
            .with_style("Title")
            .with_run(Run::new("Agreement").bold(true).with_font("Arial", 18.0)),
    );
    body.add_paragraph(Paragraph::new(0, "The parties agree as follows."));
    body.tables
        .push(Table::from_rows(0, vec![vec!["Name", "Role"], vec!["Ana", "Buyer"]]));
    body.images.push(Image::new(0, "not base64 at all", 8, 8));
    Document::Word(body)
}

fn sample_pdf() -> Document {
    Document::Pdf(PdfContent {
        pages: vec![
            Page::new(1, "Intro. Scope!\nTerms apply?"),
            Page::new(2, "Signatures"),
        ],
        annotations: vec![
            Annotation::new(1, "Highlight")
                .with_rect([10.0, 20.0, 30.0, 40.0])
                .with_color(1.0, 1.0, 0.0),
            Annotation::new(2, "Text")
                .with_id("n-1")
                .with_contents("check")
                .with_author("Ana"),
        ],
    })
}

fn sample_sheet() -> Document {
    Document::Spreadsheet(
        SheetContent::new()
            .with_sheet(
                Sheet::new("Data")
                    .with_cell(Cell::new("A1", "Item"))
                    .with_cell(Cell::new("B1", 10))
                    .with_cell(Cell::new("B2", 2.5))
                    .with_cell(Cell::new("C1", true)),
            )
            .with_sheet(Sheet::new("Notes").with_cell(Cell::new("A1", "n/a"))),
    )
}

fn assert_no_changes(report: &ChangeReport) {
    assert_eq!(report.summary.total_changes, 0, "{:?}", report);
    assert!(report.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_self_comparison_is_empty() {
    for doc in [sample_word(), sample_pdf(), sample_sheet()] {
        assert_no_changes(&detect(&doc, &doc.clone()));
    }
}

#[test]
fn test_self_comparison_survives_json_round_trip() {
    for doc in [sample_word(), sample_pdf(), sample_sheet()] {
        let json = serde_json::to_string(&doc).unwrap();
        let copy = Document::from_json(&json).unwrap();
        assert_no_changes(&detect(&doc, &copy));
    }
}

/// The content a presence record carries, regardless of direction.
fn payload(record: &ChangeRecord) -> Option<String> {
    match record {
        ChangeRecord::TextChange(c) if c.change_type != ChangeType::Modified => c.content.clone(),
        ChangeRecord::SheetAdded(c) | ChangeRecord::SheetDeleted(c) => Some(c.sheet_name.clone()),
        ChangeRecord::CellAdded(c) | ChangeRecord::CellDeleted(c) => {
            Some(format!("{}!{}={}", c.sheet_name, c.coordinate, c.value))
        }
        ChangeRecord::AnnotationChange(c) if c.change_type != ChangeType::Modified => {
            Some(c.id.clone())
        }
        _ => None,
    }
}

fn presence(report: &ChangeReport, change_type: ChangeType) -> Vec<String> {
    let mut items: Vec<String> = report
        .iter()
        .filter(|(_, r)| r.change_type() == change_type)
        .filter_map(|(_, r)| payload(r))
        .collect();
    items.sort();
    items
}

fn assert_symmetric(a: &Document, b: &Document) {
    let forward = detect(a, b);
    let backward = detect(b, a);

    assert_eq!(
        presence(&forward, ChangeType::Added),
        presence(&backward, ChangeType::Deleted)
    );
    assert_eq!(
        presence(&forward, ChangeType::Deleted),
        presence(&backward, ChangeType::Added)
    );
    assert_eq!(forward.summary.total_changes, backward.summary.total_changes);
}

#[test]
fn test_add_delete_symmetry_word() {
    let a = Document::Word(WordContent::from_texts(["One", "Two"]));
    let b = Document::Word(WordContent::from_texts(["One", "Two changed", "Three", "Four"]));
    assert_symmetric(&a, &b);
}

#[test]
fn test_add_delete_symmetry_pages() {
    let a = Document::Pdf(PdfContent::from_page_texts(["Alpha. Beta. Gamma."]));
    let b = Document::Pdf(PdfContent::from_page_texts([
        "Alpha. Delta. Gamma. Epsilon.",
        "Second page.",
    ]));
    assert_symmetric(&a, &b);
}

#[test]
fn test_add_delete_symmetry_sheets() {
    let a = sample_sheet();
    let b = Document::Spreadsheet(
        SheetContent::new()
            .with_sheet(
                Sheet::new("Data")
                    .with_cell(Cell::new("A1", "Item"))
                    .with_cell(Cell::new("B1", 12))
                    .with_cell(Cell::new("D4", "new")),
            )
            .with_sheet(Sheet::new("Summary").with_cell(Cell::new("A1", 1))),
    );
    assert_symmetric(&a, &b);
}

#[test]
fn test_add_delete_symmetry_annotations() {
    let a = sample_pdf();
    let Document::Pdf(mut content) = sample_pdf() else {
        unreachable!()
    };
    content.annotations.remove(0);
    content
        .annotations
        .push(Annotation::new(2, "FreeText").with_contents("added later"));
    let b = Document::Pdf(content);
    assert_symmetric(&a, &b);
}

#[test]
fn test_token_round_trip() {
    let cases = [
        ("Hello world", "Hello there world"),
        ("Total: $1,200.00 (net)", "Total: $1,250.00 (gross)\n"),
        ("  leading   spaces", "leading spaces  "),
        ("", "Only new"),
        ("Only old", ""),
        ("naïve café", "naive café!"),
    ];

    for (old, new) in cases {
        let a = tokenize(old);
        let b = tokenize(new);
        assert_eq!(a.concat(), old);
        assert_eq!(b.concat(), new);

        let mut rebuilt_old = String::new();
        let mut rebuilt_new = String::new();
        for op in SequenceMatcher::new(&a, &b).opcodes() {
            match op.tag {
                OpTag::Equal => {
                    rebuilt_old.push_str(&a[op.a_range()].concat());
                    rebuilt_new.push_str(&b[op.b_range()].concat());
                }
                OpTag::Insert => rebuilt_new.push_str(&b[op.b_range()].concat()),
                OpTag::Delete => rebuilt_old.push_str(&a[op.a_range()].concat()),
                OpTag::Replace => {
                    rebuilt_old.push_str(&a[op.a_range()].concat());
                    rebuilt_new.push_str(&b[op.b_range()].concat());
                }
            }
        }
        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }
}

#[test]
fn test_change_type_matches_sides() {
    let a = Document::Word(WordContent::from_texts(["Keep", "Edit me", "Drop"]));
    let b = Document::Word(WordContent::from_texts(["Keep", "Edited"]));
    let report = detect(&a, &b);

    for (_, record) in report.iter() {
        let ChangeRecord::TextChange(change) = record else {
            continue;
        };
        let index = change.paragraph_index.unwrap();
        let expected = match (index < 3, index < 2) {
            (true, true) => ChangeType::Modified,
            (true, false) => ChangeType::Deleted,
            (false, true) => ChangeType::Added,
            (false, false) => unreachable!(),
        };
        assert_eq!(change.change_type, expected, "paragraph {}", index);
        assert_eq!(
            change.content.is_some(),
            change.change_type != ChangeType::Modified
        );
        assert_eq!(
            change.content_html.is_some(),
            change.change_type == ChangeType::Modified
        );
    }
}

#[test]
fn test_identity_is_idempotent() {
    let annotation = Annotation::new(3, "Highlight")
        .with_rect([1.0001, 2.0, 3.5, 4.25])
        .with_contents("x".repeat(100));

    let first = annotation_key(&annotation);
    assert_eq!(first, annotation_key(&annotation));
    assert_eq!(first, annotation_key(&annotation.clone()));
    assert!(first.starts_with("AUTO-"));
    assert_eq!(first.len(), "AUTO-".len() + 10);

    // Rounding to three decimals and the 64-character prefix both absorb
    // differences.
    let noisy = Annotation::new(3, "Highlight")
        .with_rect([1.00012, 2.0, 3.5, 4.25])
        .with_contents(format!("{}{}", "x".repeat(64), "y".repeat(36)));
    assert_eq!(fallback_key(&noisy), first);

    let named = annotation.clone().with_id("NM-7");
    assert_eq!(annotation_key(&named), "NM-7");
    assert_eq!(fallback_key(&named), first);
}
