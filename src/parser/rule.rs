use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{first, selector, text_of, ExtractError};
use crate::example::GrammarExample;

static EXAMPLES: LazyLock<Selector> = LazyLock::new(|| selector("div#examples"));
static EXAMPLE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class*="example-cont"]"#));
static EXAMPLE_MAIN: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[class*="example-main"]"#));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static MEANING: LazyLock<Selector> = LazyLock::new(|| selector("div#meaning p.eng-definition"));
static LEVEL: LazyLock<Selector> = LazyLock::new(|| selector("p.glm-level a"));

/// Every example sentence on a grammar rule page, in document order.
///
/// Returns [`ExtractError::MissingExamples`] when the page has no examples
/// container; any other structural problem is reported as its own variant.
pub fn parse_rule_page(html: &str) -> Result<Vec<GrammarExample>, ExtractError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let container = root
        .select(&EXAMPLES)
        .next()
        .ok_or(ExtractError::MissingExamples)?;
    let blocks: Vec<ElementRef<'_>> = container.select(&EXAMPLE_BLOCK).collect();

    let meaning = text_of(first(root, &MEANING, "div#meaning p.eng-definition")?);
    let jlpt_level = text_of(first(root, &LEVEL, "p.glm-level a")?);

    blocks
        .into_iter()
        .map(|block| parse_example(block, &jlpt_level, &meaning))
        .collect()
}

fn parse_example(
    block: ElementRef<'_>,
    jlpt_level: &str,
    meaning: &str,
) -> Result<GrammarExample, ExtractError> {
    let id = block.value().id().ok_or(ExtractError::MissingAttribute {
        element: "div.example-cont",
        attr: "id",
    })?;

    let main = first(block, &EXAMPLE_MAIN, "div.example-main")?;
    let sentence = first(main, &PARAGRAPH, "div.example-main p")?;

    Ok(GrammarExample {
        jlpt_level: jlpt_level.to_string(),
        meaning: meaning.to_string(),
        japanese_sentence: text_of(main),
        colored_japanese_sentence: sentence.inner_html(),
        english_translation: text_of(div_by_id(block, &format!("{}_en", id))?),
        hiragana_transliteration: text_of(div_by_id(block, &format!("{}_ja", id))?),
    })
}

/// Descendant `div` with the exact id. Block ids come from the page, so they
/// are matched directly rather than spliced into a CSS selector.
fn div_by_id<'a>(scope: ElementRef<'a>, id: &str) -> Result<ElementRef<'a>, ExtractError> {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div" && el.value().id() == Some(id))
        .ok_or_else(|| ExtractError::MissingElement(format!("div#{}", id)))
}
