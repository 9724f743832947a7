//! Autocompletion page parser

use markup5ever_rcdom::Handle;

use crate::parsers::html::dom::{
    extract_content_until, extract_values, html_to_dom, merge_spaces, node_has_class, select,
    Matcher, Step,
};
use crate::parsers::word_properties::WordProperties;
use crate::types::{AutocompletionItem, AutocompletionTranslation, Autocompletions};

const ITEM: Step = Step::Descendant(Matcher::tag("div").class("autocompletion_item"));
const MAIN_ROW: Step = Step::Child(Matcher::tag("div").class("main_row"));
const MAIN_ITEM: [Step; 2] = [MAIN_ROW, Step::Child(Matcher::tag("div").class("main_item"))];
const MAIN_WORDTYPE: [Step; 2] = [
    MAIN_ROW,
    Step::Child(Matcher::tag("div").class("main_wordtype")),
];
const TRANSLATION_ITEMS: [Step; 3] = [
    Step::Child(Matcher::tag("div").class("translation_row")),
    Step::Child(Matcher::tag("div")),
    Step::Child(Matcher::tag("div").class("translation_item")),
];
const WORDTYPE: Step = Step::Child(Matcher::tag("div").class("wordtype"));

/// Parses the suggestion list shown while a word is being typed
///
/// Items without any text are skipped. A page without suggestions yields an empty list.
pub fn parse_autocompletions(page: &str) -> Autocompletions {
    let dom = html_to_dom(page);

    let autocompletions = select(&dom.document, &[ITEM])
        .iter()
        .map(item_from_node)
        .filter(|item| !item.text.is_empty())
        .collect();

    Autocompletions { autocompletions }
}

fn item_from_node(node: &Handle) -> AutocompletionItem {
    let translations = select(node, &TRANSLATION_ITEMS)
        .iter()
        .map(|translation_node| AutocompletionTranslation {
            // The word type sits inside the item, after the text
            text: merge_spaces(&extract_content_until(translation_node, &[], |child| {
                node_has_class(child, "wordtype")
            })),
            word_type: short_word_type(translation_node, &[WORDTYPE]),
        })
        .filter(|translation| !translation.text.is_empty())
        .collect();

    AutocompletionItem {
        text: merge_spaces(&extract_values(node, &MAIN_ITEM).join(" ")),
        word_type: short_word_type(node, &MAIN_WORDTYPE),
        translations,
    }
}

fn short_word_type(node: &Handle, path: &[Step]) -> WordProperties {
    WordProperties::parse_short(&merge_spaces(&extract_values(node, path).join(" ")))
}
