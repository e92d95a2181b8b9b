//! Bounding-box assignment for extracted fields.

use crate::models::contact::{ContactField, ContactRecord, FieldBoxes};
use crate::ocr::Token;

/// Assign each field the box of the first token that evidences it.
///
/// Single pass in stream order. A token evidences a field when its raw text
/// is a substring of the field's value. Fields are tried in
/// [`ContactField::ALL`] order and each token is given to at most one field;
/// a field keeps the first box it receives.
pub fn assign_boxes(tokens: &[Token], record: &ContactRecord) -> FieldBoxes {
    let mut boxes = FieldBoxes::default();

    for token in tokens.iter().filter(|t| !t.is_blank()) {
        if boxes.is_complete() {
            break;
        }

        let field = ContactField::ALL.into_iter().find(|field| {
            boxes.get(*field).is_none() && record.get(*field).contains(token.text.as_str())
        });

        if let Some(field) = field {
            boxes.set(field, token.bounding_box());
        }
    }

    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::contact::BoundingBox;
    use pretty_assertions::assert_eq;

    fn record(name: &str, email: &str, phone: &str, company: &str) -> ContactRecord {
        ContactRecord {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            company: company.to_string(),
        }
    }

    #[test]
    fn test_first_token_wins() {
        let tokens = vec![
            Token::new("John", 10, 10, 40, 12),
            Token::new("Smith", 60, 10, 50, 12),
        ];
        let boxes = assign_boxes(&tokens, &record("John Smith", "", "", ""));

        assert_eq!(boxes.name, Some(BoundingBox::new(10, 10, 40, 12)));
        assert_eq!(boxes.email, None);
    }

    #[test]
    fn test_name_takes_precedence() {
        // "Acme" is inside both name and company; name is tried first
        let tokens = vec![
            Token::new("Acme", 0, 0, 10, 10),
            Token::new("Acme", 0, 20, 10, 10),
        ];
        let boxes = assign_boxes(&tokens, &record("Acme Corp", "", "", "Acme Corp"));

        assert_eq!(boxes.name, Some(BoundingBox::new(0, 0, 10, 10)));
        assert_eq!(boxes.company, Some(BoundingBox::new(0, 20, 10, 10)));
    }

    #[test]
    fn test_one_field_per_token() {
        let tokens = vec![Token::new("555", 0, 0, 30, 10)];
        let boxes = assign_boxes(&tokens, &record("", "", "555-1234", "555"));

        assert_eq!(boxes.phone, Some(BoundingBox::new(0, 0, 30, 10)));
        assert_eq!(boxes.company, None);
    }

    #[test]
    fn test_blank_tokens_skipped() {
        let tokens = vec![
            Token::new(" ", 0, 0, 5, 5),
            Token::new("", 0, 0, 5, 5),
            Token::new("Doe", 7, 7, 20, 10),
        ];
        let boxes = assign_boxes(&tokens, &record("Jane Doe", "", "", ""));

        assert_eq!(boxes.name, Some(BoundingBox::new(7, 7, 20, 10)));
    }

    #[test]
    fn test_no_box_for_empty_field() {
        let tokens = vec![Token::new("x", 0, 0, 5, 5)];
        let boxes = assign_boxes(&tokens, &ContactRecord::default());

        assert_eq!(boxes, FieldBoxes::default());
    }

    #[test]
    fn test_substring_false_positive_is_kept() {
        // "an" is not the name, but it is a substring of it
        let tokens = vec![
            Token::new("an", 0, 0, 10, 10),
            Token::new("Jane", 0, 20, 10, 10),
        ];
        let boxes = assign_boxes(&tokens, &record("Jane Doe", "", "", ""));

        assert_eq!(boxes.name, Some(BoundingBox::new(0, 0, 10, 10)));
    }
}
