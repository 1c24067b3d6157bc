//! Annotation comparison for page-oriented documents.
//!
//! Annotations are matched by identity key rather than position, so moving
//! an annotation to another slot in the list is not a change. Geometry and
//! color are compared after rounding to three decimals.

use crate::diff::word_diff;
use crate::identity::{annotation_key, round_floats};
use crate::model::{Annotation, Document, DocumentKind};
use crate::report::{AnnotationChange, AnnotationSnapshot, ChangeRecord, ChangeType};
use std::collections::HashMap;

/// Compare annotations of two page-oriented documents.
///
/// Emits `added` records in revised order, then `deleted` and `modified`
/// records in original order.
pub fn annotation_changes(original: &Document, revised: &Document) -> Vec<ChangeRecord> {
    let (Document::Pdf(a), Document::Pdf(b)) = (original, revised) else {
        return Vec::new();
    };

    let old = KeyedAnnotations::new(&a.annotations);
    let new = KeyedAnnotations::new(&b.annotations);
    let mut records = Vec::new();

    for (key, annotation) in new.iter() {
        if old.get(key).is_none() {
            records.push(presence_change(ChangeType::Added, key, annotation));
        }
    }
    for (key, annotation) in old.iter() {
        if new.get(key).is_none() {
            records.push(presence_change(ChangeType::Deleted, key, annotation));
        }
    }
    for (key, before) in old.iter() {
        if let Some(after) = new.get(key) {
            records.extend(modification(key, before, after));
        }
    }

    log::debug!("annotation comparator: {} records", records.len());
    records
}

/// Annotations keyed by identity, in first-occurrence order.
///
/// A repeated key keeps its first position and the last annotation.
struct KeyedAnnotations<'d> {
    entries: Vec<(String, &'d Annotation)>,
    index: HashMap<String, usize>,
}

impl<'d> KeyedAnnotations<'d> {
    fn new(annotations: &'d [Annotation]) -> Self {
        let mut entries: Vec<(String, &'d Annotation)> = Vec::with_capacity(annotations.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(annotations.len());
        for annotation in annotations {
            let key = annotation_key(annotation);
            match index.get(&key).copied() {
                Some(slot) => entries[slot].1 = annotation,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, annotation));
                }
            }
        }
        Self { entries, index }
    }

    fn get(&self, key: &str) -> Option<&'d Annotation> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &'d Annotation)> + '_ {
        self.entries.iter().map(|(key, a)| (key.as_str(), *a))
    }
}

fn presence_change(change_type: ChangeType, key: &str, annotation: &Annotation) -> ChangeRecord {
    ChangeRecord::AnnotationChange(AnnotationChange {
        change_type,
        document_type: DocumentKind::Pdf,
        id: key.to_string(),
        page_number: annotation.page_number,
        subtype: annotation.subtype.clone(),
        content: annotation.contents.clone(),
        rect: annotation.rect.clone(),
        quadpoints: annotation.quadpoints.clone(),
        author: annotation.author.clone(),
        subject: annotation.subject.clone(),
        color: annotation.color.clone(),
        content_html: None,
        old: None,
        new: None,
        changed_fields: None,
    })
}

fn modification(key: &str, before: &Annotation, after: &Annotation) -> Option<ChangeRecord> {
    let mut changed = Vec::new();
    let mut content_html = None;

    let (old_contents, new_contents) = (before.contents_text(), after.contents_text());
    if old_contents != new_contents {
        changed.push("contents");
        content_html = Some(word_diff(old_contents, new_contents).html);
    }

    let rounded = |a: &Option<Vec<f64>>, b: &Option<Vec<f64>>| {
        round_floats(a.as_deref()) != round_floats(b.as_deref())
    };
    if rounded(&before.rect, &after.rect) {
        changed.push("rect");
    }
    if rounded(&before.quadpoints, &after.quadpoints) {
        changed.push("quadpoints");
    }
    if rounded(&before.color, &after.color) {
        changed.push("color");
    }

    let text = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();
    if text(&before.subtype) != text(&after.subtype) {
        changed.push("subtype");
    }
    if text(&before.author) != text(&after.author) {
        changed.push("author");
    }
    if text(&before.subject) != text(&after.subject) {
        changed.push("subject");
    }

    if changed.is_empty() {
        return None;
    }

    Some(ChangeRecord::AnnotationChange(AnnotationChange {
        change_type: ChangeType::Modified,
        document_type: DocumentKind::Pdf,
        id: key.to_string(),
        page_number: after.page_number,
        subtype: after.subtype.clone(),
        content: None,
        rect: None,
        quadpoints: None,
        author: None,
        subject: None,
        color: None,
        content_html,
        old: Some(snapshot(before)),
        new: Some(snapshot(after)),
        changed_fields: Some(changed.into_iter().map(String::from).collect()),
    }))
}

fn snapshot(annotation: &Annotation) -> AnnotationSnapshot {
    AnnotationSnapshot {
        contents: annotation.contents_text().to_string(),
        rect: annotation.rect.clone(),
        quadpoints: annotation.quadpoints.clone(),
        color: annotation.color.clone(),
        author: annotation.author.clone(),
        subject: annotation.subject.clone(),
        subtype: annotation.subtype.clone(),
    }
}
