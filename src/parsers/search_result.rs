//! Search result page parser
//!
//! Turns the HTML of a dictionary results page into an [`ApiResponse`].
//! Optional parts of the page (the dictionary block, example phrases, the real
//! examples table, single lemmas) degrade to empty lists when missing or malformed; only a page
//! without the `#data` metadata container is rejected outright.

use markup5ever_rcdom::Handle;
use tracing::debug;

use crate::core::LingueeError;
use crate::parsers::html::dom::{
    extract_attr, extract_content_until, extract_value, extract_values, get_by_id, get_node_attr,
    html_to_dom, merge_spaces, node_has_class, select, Matcher, Step,
};
use crate::parsers::word_properties::WordProperties;
use crate::types::{
    ApiResponse, AudioLink, ExamplePhrase, ExamplePhraseTranslation, Lemma, LemmaForm,
    RealExample, Translation, TranslationExample, UsageFrequency,
};

const NO_RESULTS: Step = Step::Descendant(Matcher::tag("h1").class("noresults"));
const CORRECTED: Step = Step::Descendant(Matcher::tag("span").class("corrected"));
const EXACT_GROUP: Step = Step::Descendant(Matcher::tag("div").class("exact"));
const DIV: Step = Step::Child(Matcher::tag("div"));
const H2: Step = Step::Child(Matcher::tag("h2"));
const TAG_WORDTYPE: Step = Step::Descendant(Matcher::tag("span").class("tag_wordtype"));
const TAG_LEMMA: Step = Step::Descendant(Matcher::tag("span").class("tag_lemma"));
const DICT_LINK: Step = Step::Child(Matcher::tag("a").class("dictLink"));
const GRAMMAR_INFO: [Step; 3] = [
    Step::Descendant(Matcher::tag("span").class("tag_lemma_context")),
    Step::Descendant(Matcher::tag("span").class("placeholder")),
    Step::Child(Matcher::tag("span").class("grammar_info")),
];
const AUDIO: Step = Step::Descendant(Matcher::tag("a").class("audio"));
const LEMMA_AUDIO: [Step; 2] = [TAG_LEMMA, Step::Child(Matcher::tag("a").class("audio"))];
const FORMS: [Step; 3] = [
    Step::Descendant(Matcher::tag("h2")),
    Step::Child(Matcher::tag("span")),
    Step::Child(Matcher::tag("span").class("tag_s")),
];
const FORM_LINK: Step = Step::Child(Matcher::tag("a").class("formLink"));
const TAG_TYPE: Step = Step::Child(Matcher::tag("span").class("tag_type"));
const TRANSLATION: Step = Step::Descendant(Matcher::tag("div").class("translation"));
const TAG_TRANS: Step = Step::Descendant(Matcher::tag("span").class("tag_trans"));
const TAG_C: Step = Step::Descendant(Matcher::tag("span").class("tag_c"));
const TRANS_LINK: Step = Step::Child(Matcher::tag("a"));
const EXAMPLE_LINES: Step = Step::Descendant(Matcher::tag("div").class("example_lines"));
const EXAMPLE_SOURCE: Step = Step::Descendant(Matcher::tag("span").class("tag_s"));
const EXAMPLE_TARGET: Step = Step::Descendant(Matcher::tag("span").class("tag_t"));
const EXAMPLE_PHRASES: [Step; 2] = [
    EXAMPLE_LINES,
    Step::Descendant(Matcher::tag("div").class("lemma")),
];
const LEMMA_WORDTYPE: [Step; 2] = [
    TAG_LEMMA,
    Step::Child(Matcher::tag("span").class("tag_wordtype")),
];
const LEMMA_TAG_TYPE: [Step; 2] = [TAG_LEMMA, TAG_TYPE];
const ROW: Step = Step::Descendant(Matcher::tag("tr"));
const CELL: Step = Step::Child(Matcher::tag("td"));
const SOURCE_URL: Step = Step::Descendant(Matcher::tag("div").class("source_url"));
const SOURCE_URL_LINK: [Step; 2] = [SOURCE_URL, Step::Child(Matcher::tag("a"))];
const SOURCE_URL_SPACER: &str = "source_url_spacer";

/// Parses a downloaded results page
///
/// A "no results" page is reported as [`ErrorKind::Correction`](crate::core::ErrorKind::Correction)
/// when the page suggests another spelling, and as
/// [`ErrorKind::NotFound`](crate::core::ErrorKind::NotFound) otherwise.
pub fn parse_search_result(page: &str) -> Result<ApiResponse, LingueeError> {
    let dom = html_to_dom(page);
    let root = &dom.document;

    if !select(root, &[NO_RESULTS]).is_empty() {
        let correction = extract_value(root, &[CORRECTED]);
        let correction = correction.trim();
        if correction.is_empty() {
            return Err(LingueeError::not_found());
        }
        return Err(LingueeError::correction(correction));
    }

    let data = get_by_id(root, "data").map_err(|e| {
        LingueeError::structure(&format!("page layout changed, <div id=\"data\">: {e}"))
    })?;

    let mut response = ApiResponse {
        src_lang: attr_or_empty(&data, "data-sourcelang").to_lowercase(),
        dst_lang: attr_or_empty(&data, "data-targetlang").to_lowercase(),
        query: attr_or_empty(&data, "data-query"),
        correct_query: attr_or_empty(&data, "data-correctspellingofquery"),
        ..Default::default()
    };

    match get_by_id(root, "dictionary") {
        Ok(dictionary) => response.exact_matches = extract_exact_matches(&dictionary),
        Err(e) => debug!("No dictionary block: {}", e),
    }

    response.examples = extract_example_phrases(root);
    response.real_examples = extract_real_examples(root);

    Ok(response)
}

fn attr_or_empty(node: &Handle, attr_name: &str) -> String {
    get_node_attr(node, attr_name).unwrap_or_default()
}

fn extract_exact_matches(dictionary: &Handle) -> Vec<Lemma> {
    let mut lemmas = Vec::new();

    for lemma_node in select(dictionary, &[EXACT_GROUP, DIV]) {
        match lemma_from_node(&lemma_node) {
            Ok(lemma) => lemmas.push(lemma),
            Err(e) => debug!("Skipping lemma: {}", e),
        }
    }

    lemmas
}

/// Extracts one lemma; a block without any headword text is rejected
fn lemma_from_node(node: &Handle) -> Result<Lemma, LingueeError> {
    let text = headword_text(node);

    if text.is_empty() {
        return Err(LingueeError::structure("lemma block without headword"));
    }

    let grammar_info = merge_spaces(&extract_value(node, &GRAMMAR_INFO));

    Ok(Lemma {
        featured: node_has_class(node, "featured"),
        wt: attr_or_empty(node, "wt").trim().parse().unwrap_or(0),
        lemma_id: extract_attr(node, &[DIV, H2], "lid"),
        text,
        word_type: WordProperties::parse_long(&extract_value(node, &[TAG_WORDTYPE])),
        grammar_info: (!grammar_info.is_empty()).then_some(grammar_info),
        audio_links: extract_audio_links(&extract_attr(node, &LEMMA_AUDIO, "onclick")),
        forms: extract_lemma_forms(node),
        translations: extract_translations(node),
    })
}

/// Joins every headword link, since one headword may be split over several links
fn headword_text(node: &Handle) -> String {
    extract_values(node, &[TAG_LEMMA, DICT_LINK])
        .iter()
        .map(|chunk| merge_spaces(chunk))
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Splits an inline handler such as
/// `playSound(this,"PT_BR/f5/f54-1000","Brazilian Portuguese","PT_PT/a1/a1b-1000","European Portuguese");`
/// on quote characters; every four chunks form one (ignored, path, ignored, label) cycle
pub fn extract_audio_links(js: &str) -> Vec<AudioLink> {
    let mut links = Vec::new();
    let mut url_part = None;

    for (i, chunk) in js.split('"').enumerate() {
        match i % 4 {
            1 => url_part = Some(chunk.to_string()),
            3 => {
                if let Some(url_part) = url_part.take() {
                    links.push(AudioLink {
                        url_part,
                        lang: chunk.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    links
}

fn extract_lemma_forms(node: &Handle) -> Vec<LemmaForm> {
    select(node, &FORMS)
        .iter()
        .map(|form_node| LemmaForm {
            text: extract_value(form_node, &[FORM_LINK]),
            form_type: WordProperties::parse_short(&extract_value(form_node, &[TAG_TYPE])),
        })
        .filter(|form| !form.text.is_empty() && form.form_type.has_any_axis())
        .collect()
}

/// Read from the class tokens of the translation's `span.tag_c` marker
fn usage_frequency(translation_node: &Handle) -> Option<UsageFrequency> {
    let marker = select(translation_node, &[TAG_C]).into_iter().next()?;

    if node_has_class(&marker, "usedveryoften") {
        Some(UsageFrequency::Often)
    } else if node_has_class(&marker, "usedalmostalways") {
        Some(UsageFrequency::AlmostAlways)
    } else {
        None
    }
}

fn extract_translations(node: &Handle) -> Vec<Translation> {
    let mut translations = Vec::new();

    for translation_node in select(node, &[TRANSLATION]) {
        let examples = select(&translation_node, &[EXAMPLE_LINES])
            .iter()
            .map(|example_node| TranslationExample {
                source: extract_value(example_node, &[EXAMPLE_SOURCE]),
                target: extract_value(example_node, &[EXAMPLE_TARGET]),
            })
            .collect();

        translations.push(Translation {
            featured: node_has_class(&translation_node, "featured"),
            text: extract_value(&translation_node, &[TAG_TRANS, TRANS_LINK]),
            bid: extract_attr(&translation_node, &[TAG_TRANS], "bid"),
            lemma_id: extract_attr(&translation_node, &[TAG_TRANS], "lid"),
            word_type: WordProperties::parse_short(&extract_value(
                &translation_node,
                &[TAG_TRANS, TAG_TYPE],
            )),
            usage_frequency: usage_frequency(&translation_node),
            audio_links: extract_audio_links(&extract_attr(&translation_node, &[AUDIO], "onclick")),
            examples,
        });
    }

    translations
}

fn extract_example_phrases(root: &Handle) -> Vec<ExamplePhrase> {
    let mut phrases = Vec::new();

    for phrase_node in select(root, &EXAMPLE_PHRASES) {
        let text = headword_text(&phrase_node);
        if text.is_empty() {
            debug!("Skipping example phrase without text");
            continue;
        }

        let long_word_type = extract_value(&phrase_node, &LEMMA_WORDTYPE);
        let word_type = if long_word_type.trim().is_empty() {
            WordProperties::parse_short(&extract_value(&phrase_node, &LEMMA_TAG_TYPE))
        } else {
            WordProperties::parse_long(&long_word_type)
        };

        let translations = select(&phrase_node, &[TAG_TRANS])
            .iter()
            .map(|translation_node| ExamplePhraseTranslation {
                text: merge_spaces(&extract_value(translation_node, &[DICT_LINK])),
                word_type: WordProperties::parse_short(&extract_value(
                    translation_node,
                    &[TAG_TYPE],
                )),
            })
            .filter(|translation| !translation.text.is_empty())
            .collect();

        phrases.push(ExamplePhrase {
            text,
            word_type,
            audio_links: extract_audio_links(&extract_attr(
                &phrase_node,
                &LEMMA_AUDIO,
                "onclick",
            )),
            translations,
        });
    }

    phrases
}

/// Link target of the cell's source marker, or its text as an http URL when it has no link
fn source_url(cell: &Handle) -> String {
    let href = extract_attr(cell, &SOURCE_URL_LINK, "href");
    if !href.is_empty() {
        return href;
    }

    let domain = merge_spaces(&extract_value(cell, &[SOURCE_URL]));
    if domain.is_empty() {
        String::new()
    } else {
        format!("http://{domain}")
    }
}

fn extract_real_examples(root: &Handle) -> Vec<RealExample> {
    let result_table = match get_by_id(root, "result_table") {
        Ok(result_table) => result_table,
        Err(e) => {
            debug!("No real examples: {}", e);
            return Vec::new();
        }
    };

    let is_spacer = |node: &Handle| node_has_class(node, SOURCE_URL_SPACER);

    select(&result_table, &[ROW])
        .iter()
        .map(|row| {
            let cells = select(row, &[CELL]);
            let column = |index: usize| {
                cells
                    .get(index)
                    .map(|cell| merge_spaces(&extract_content_until(cell, &[DIV], is_spacer)))
                    .unwrap_or_default()
            };
            let url = |index: usize| cells.get(index).map(source_url).unwrap_or_default();

            RealExample {
                id: attr_or_empty(row, "id"),
                src: column(0),
                dst: column(1),
                url: url(0),
                dst_url: url(1),
            }
        })
        .collect()
}
