//! Set and card display formatting
//!
//! Formats sets and cards for terminal output as plain tables.

use crate::models::{Card, CardRecord, CardSet};
use crate::services::SetSummary;

/// First line of a possibly multi-line definition
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Format sets with their card counts
pub fn format_set_list(summaries: &[SetSummary]) -> String {
    if summaries.is_empty() {
        return "No sets found.\n\nAdd a card with 'flashdeck set add <SET> <TERM> <DEFINITION>'."
            .to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.set.name.chars().count())
        .max()
        .unwrap_or(3)
        .max(3);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>5}  {}\n",
        "Set",
        "Cards",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->5}  {:-<8}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<width$}  {:>5}  {}\n",
            summary.set.name,
            summary.card_count,
            summary.set.id,
            width = name_width
        ));
    }

    output
}

/// Format a set's cards, with ids so single cards can be removed
pub fn format_set_details(set: &CardSet, cards: &[CardRecord]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Set: {} ({})\n", set.name, set.id));
    output.push_str(&format!("  Cards: {}\n", cards.len()));

    if cards.is_empty() {
        output.push_str("\n  (no cards)\n");
        return output;
    }

    let term_width = cards
        .iter()
        .map(|c| c.card.term.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    output.push('\n');
    output.push_str(&format!(
        "  {:<10}  {:<width$}  {}\n",
        "ID",
        "Term",
        "Definition",
        width = term_width
    ));

    for record in cards {
        let definition = first_line(&record.card.definition);
        let more = if record.card.definition.lines().count() > 1 {
            " ..."
        } else {
            ""
        };
        output.push_str(&format!(
            "  {:<10}  {:<width$}  {}{}\n",
            record.id.to_string(),
            record.card.term,
            definition,
            more,
            width = term_width
        ));
    }

    output
}

/// Format plain cards (a flat-file deck) as term and first definition line
pub fn format_card_list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "No cards in this deck.".to_string();
    }

    let term_width = cards
        .iter()
        .map(|c| c.term.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!("{:<width$}  {}\n", "Term", "Definition", width = term_width));
    output.push_str(&format!("{:-<width$}  {:-<10}\n", "", "", width = term_width));

    for card in cards {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            card.term,
            first_line(&card.definition),
            width = term_width
        ));
    }

    output.push_str(&format!("\n{} cards\n", cards.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardId, SetId};

    fn spanish() -> CardSet {
        CardSet {
            id: SetId::from_raw(1),
            name: "Spanish".into(),
        }
    }

    #[test]
    fn test_empty_set_list() {
        assert!(format_set_list(&[]).starts_with("No sets found."));
    }

    #[test]
    fn test_set_list_columns() {
        let output = format_set_list(&[SetSummary {
            set: spanish(),
            card_count: 12,
        }]);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Set      Cards  ID");
        assert_eq!(lines[2], "Spanish     12  set-1");
    }

    #[test]
    fn test_set_details_truncates_multiline_definitions() {
        let cards = vec![CardRecord {
            id: CardId::from_raw(4),
            set_id: SetId::from_raw(1),
            card: Card::new("perro", "dog\nalso: hound").unwrap(),
        }];

        let output = format_set_details(&spanish(), &cards);
        assert!(output.contains("Set: Spanish (set-1)"));
        assert!(output.contains("card-4"));
        assert!(output.contains("dog ..."));
        assert!(!output.contains("hound"));
    }

    #[test]
    fn test_card_list() {
        let cards = vec![
            Card::new("Cat", "A small animal").unwrap(),
            Card::new("Dog", "").unwrap(),
        ];
        let output = format_card_list(&cards);
        assert!(output.contains("Cat   A small animal"));
        assert!(output.ends_with("2 cards\n"));
        assert_eq!(format_card_list(&[]), "No cards in this deck.");
    }
}
