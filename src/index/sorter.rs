//! Composite hit ordering for the in-memory index
//!
//! Keys are extracted once per hit, then compared field by field. Ties
//! left by every criterion fall back to ascending document id, so the order
//! is deterministic.

use std::cmp::Ordering;

use crate::search::{DocId, IndexError, ScoreDoc, SortField, SortKind, StoredDocument};

/// A hit's value for one sort criterion
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    /// Field not stored on this document
    Missing,
    Str(String),
    Int(i64),
    Float(f64),
    /// Score and doc criteria compare on the hit itself
    Hit,
}

impl SortValue {
    /// Missing values sort before everything else
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Less,
            (_, SortValue::Missing) => Ordering::Greater,
            (SortValue::Str(a), SortValue::Str(b)) => a.cmp(b),
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Float(a), SortValue::Float(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A hit with its precomputed sort keys
struct Keyed {
    hit: ScoreDoc,
    keys: Vec<SortValue>,
}

/// Orders hits by relevance: best score first, then document id
pub fn sort_by_relevance(hits: &mut [ScoreDoc]) {
    hits.sort_by(|a, b| compare_score(a, b).then(a.doc.cmp(&b.doc)));
}

/// Orders hits by `fields`, reading stored values through `lookup`.
///
/// Fails if a value cannot be read as its criterion's type.
pub fn sort_by_fields<'d, L>(
    hits: Vec<ScoreDoc>,
    fields: &[SortField],
    lookup: L,
) -> Result<Vec<ScoreDoc>, IndexError>
where
    L: Fn(DocId) -> Option<&'d StoredDocument>,
{
    let mut keyed = Vec::with_capacity(hits.len());
    for hit in hits {
        let doc = lookup(hit.doc);
        let keys = fields
            .iter()
            .map(|field| extract(field, doc))
            .collect::<Result<Vec<_>, _>>()?;
        keyed.push(Keyed { hit, keys });
    }

    keyed.sort_by(|a, b| {
        for (i, field) in fields.iter().enumerate() {
            let ordering = match field.kind {
                SortKind::Score => compare_score(&a.hit, &b.hit),
                SortKind::Doc => a.hit.doc.cmp(&b.hit.doc),
                _ => a.keys[i].compare(&b.keys[i]),
            };
            let ordering = if field.reverse {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.hit.doc.cmp(&b.hit.doc)
    });

    Ok(keyed.into_iter().map(|k| k.hit).collect())
}

/// Higher scores first
fn compare_score(a: &ScoreDoc, b: &ScoreDoc) -> Ordering {
    b.score.total_cmp(&a.score)
}

fn extract(field: &SortField, doc: Option<&StoredDocument>) -> Result<SortValue, IndexError> {
    let name = match (&field.field, field.kind.needs_field()) {
        (_, false) => return Ok(SortValue::Hit),
        (Some(name), true) => name,
        (None, true) => {
            return Err(IndexError::UnknownSortField(format!(
                "<{} sort without a field>",
                field.kind.as_str()
            )))
        }
    };

    let raw = match doc.and_then(|d| d.get(name)) {
        Some(raw) => raw.trim(),
        None => return Ok(SortValue::Missing),
    };

    let invalid = || IndexError::InvalidSortValue {
        field: name.clone(),
        value: raw.to_string(),
    };

    match field.kind {
        SortKind::String => Ok(SortValue::Str(raw.to_string())),
        SortKind::Int => raw.parse().map(SortValue::Int).map_err(|_| invalid()),
        SortKind::Float => raw.parse().map(SortValue::Float).map_err(|_| invalid()),
        SortKind::Score | SortKind::Doc => Ok(SortValue::Hit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<StoredDocument> {
        vec![
            StoredDocument::new().with("name", "charlie").with("age", "30"),
            StoredDocument::new().with("name", "alice").with("age", "25"),
            StoredDocument::new().with("name", "bob").with("age", "25"),
            StoredDocument::new().with("name", "dave"),
        ]
    }

    fn all_hits() -> Vec<ScoreDoc> {
        vec![
            ScoreDoc::new(0, 1.0),
            ScoreDoc::new(1, 3.0),
            ScoreDoc::new(2, 2.0),
            ScoreDoc::new(3, 2.0),
        ]
    }

    fn sorted(fields: &[SortField]) -> Vec<DocId> {
        let docs = docs();
        sort_by_fields(all_hits(), fields, |d| docs.get(d as usize))
            .unwrap()
            .into_iter()
            .map(|h| h.doc)
            .collect()
    }

    #[test]
    fn test_relevance_ties_by_doc() {
        let mut hits = all_hits();
        sort_by_relevance(&mut hits);
        let order: Vec<_> = hits.iter().map(|h| h.doc).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_string_ascending() {
        assert_eq!(sorted(&[SortField::string("name")]), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_string_descending() {
        assert_eq!(
            sorted(&[SortField::string("name").reversed()]),
            vec![3, 0, 2, 1]
        );
    }

    #[test]
    fn test_missing_sorts_first() {
        assert_eq!(sorted(&[SortField::int("age")]), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_composite_tie_break() {
        // age ties between alice (1) and bob (2) are broken by name descending
        assert_eq!(
            sorted(&[SortField::int("age"), SortField::string("name").reversed()]),
            vec![3, 2, 1, 0]
        );
    }

    #[test]
    fn test_score_criterion() {
        assert_eq!(sorted(&[SortField::score()]), vec![1, 2, 3, 0]);
        assert_eq!(sorted(&[SortField::doc().reversed()]), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_unparseable_int_fails() {
        let docs = vec![StoredDocument::new().with("age", "old")];
        let err = sort_by_fields(vec![ScoreDoc::new(0, 1.0)], &[SortField::int("age")], |d| {
            docs.get(d as usize)
        })
        .unwrap_err();
        assert!(matches!(err, IndexError::InvalidSortValue { ref value, .. } if value == "old"));
    }

    #[test]
    fn test_typed_sort_without_field_fails() {
        let field = SortField {
            field: None,
            kind: SortKind::String,
            reverse: false,
        };
        let err = sort_by_fields(all_hits(), &[field], |_| None).unwrap_err();
        assert!(matches!(err, IndexError::UnknownSortField(_)));
    }
}
