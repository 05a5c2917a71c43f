//! Multi-select answer normalization.
//!
//! Checkbox questions export their answers as a single cell, separated by
//! commas or semicolons in whatever order the respondent ticked them. The
//! same set of choices must map to the same category, so answers are
//! reduced to a canonical sorted form.

/// Separator used in canonical multi-select answers.
pub const MULTISELECT_SEPARATOR: char = ';';

/// Canonicalizes a multi-select answer.
///
/// Commas become semicolons, items are trimmed, empty items dropped, and
/// the rest sorted and joined with `;`. Returns `None` when no item remains.
pub fn standardize_multiselect(answer: &str) -> Option<String> {
    let normalized = answer.replace(',', ";");
    let mut items: Vec<&str> = normalized
        .split(MULTISELECT_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return None;
    }

    items.sort_unstable();
    Some(items.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sorts_and_rejoins_items() {
        assert_eq!(
            standardize_multiselect("Pessoa negra, Mulher").as_deref(),
            Some("Mulher;Pessoa negra")
        );
    }

    #[test]
    fn mixed_separators_are_unified() {
        assert_eq!(
            standardize_multiselect("LGBTQIAPN+; Mulher,Pessoa com deficiência").as_deref(),
            Some("LGBTQIAPN+;Mulher;Pessoa com deficiência")
        );
    }

    #[test]
    fn empty_items_are_dropped() {
        assert_eq!(standardize_multiselect(" ;Mulher;; ,").as_deref(), Some("Mulher"));
    }

    #[test]
    fn blank_answer_becomes_missing() {
        assert_eq!(standardize_multiselect(" ; , "), None);
        assert_eq!(standardize_multiselect(""), None);
    }

    #[test]
    fn single_item_is_trimmed() {
        assert_eq!(standardize_multiselect("  Nenhum  ").as_deref(), Some("Nenhum"));
    }

    proptest! {
        #[test]
        fn order_of_choices_does_not_matter(
            items in proptest::collection::vec("[A-Za-z ]{1,12}", 1..6)
        ) {
            let forward = items.join(", ");
            let mut reversed_items = items.clone();
            reversed_items.reverse();
            let reversed = reversed_items.join(";");

            prop_assert_eq!(
                standardize_multiselect(&forward),
                standardize_multiselect(&reversed)
            );
        }

        #[test]
        fn standardization_is_idempotent(answer in "[A-Za-z ,;]{0,40}") {
            if let Some(once) = standardize_multiselect(&answer) {
                prop_assert_eq!(standardize_multiselect(&once), Some(once.clone()));
            }
        }

        #[test]
        fn output_never_contains_commas_or_padding(answer in "[A-Za-z ,;]{0,40}") {
            if let Some(canonical) = standardize_multiselect(&answer) {
                prop_assert!(!canonical.contains(','));
                for item in canonical.split(';') {
                    prop_assert_eq!(item, item.trim());
                    prop_assert!(!item.is_empty());
                }
            }
        }
    }
}
