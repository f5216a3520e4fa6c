use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("{0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("text is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("document has no root element")]
    NoRootElement,
    #[error("document has more than one root element")]
    MultipleRootElements,
    #[error("text content outside the root element")]
    ContentOutsideRoot,
    #[error("document ended with {0} unclosed element(s)")]
    UnclosedElements(usize),
}

/// Rejects unquoted or duplicate attributes and undefined entities in attribute values.
fn check_attributes(e: &BytesStart) -> Result<(), XmlError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        attr.unescape_value()?;
    }
    Ok(())
}

/// Collects the text content of every element with the given qualified name, in document
/// order. `r:Value` does not match `Value`. Nested text counts towards every enclosing match.
///
/// The whole document is checked for well-formedness, not only the matched elements.
pub fn element_texts(body: &[u8], name: &str) -> Result<Vec<String>, XmlError> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let target = name.as_bytes();
    let mut texts: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if depth == 0 && seen_root {
                    return Err(XmlError::MultipleRootElements);
                }
                check_attributes(&e)?;
                seen_root = true;
                depth += 1;
                if e.name().as_ref() == target {
                    open.push(texts.len());
                    texts.push(String::new());
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if e.name().as_ref() == target {
                    open.pop();
                }
            }
            Event::Empty(e) => {
                if depth == 0 && seen_root {
                    return Err(XmlError::MultipleRootElements);
                }
                check_attributes(&e)?;
                seen_root = true;
                if e.name().as_ref() == target {
                    texts.push(String::new());
                }
            }
            Event::Text(t) => {
                if depth == 0 {
                    return Err(XmlError::ContentOutsideRoot);
                }
                let text = t.unescape()?;
                for &i in &open {
                    texts[i].push_str(&text);
                }
            }
            Event::CData(c) => {
                if depth == 0 {
                    return Err(XmlError::ContentOutsideRoot);
                }
                let text = std::str::from_utf8(&c)?;
                for &i in &open {
                    texts[i].push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(XmlError::NoRootElement);
    }
    if depth > 0 {
        return Err(XmlError::UnclosedElements(depth));
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_values_in_document_order() {
        let xml = br#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs ID="R01235" DateRange1="02.03.2024" DateRange2="05.03.2024" name="Foreign Currency Market Dynamic">
  <Record Date="02.03.2024" Id="R01235"><Nominal>1</Nominal><Value>91,3336</Value></Record>
  <Record Date="05.03.2024" Id="R01235"><Nominal>1</Nominal><Value>91,2434</Value></Record>
</ValCurs>"#;
        let values = element_texts(xml, "Value").unwrap();
        assert_eq!(values, vec!["91,3336", "91,2434"]);
    }

    #[test]
    fn test_matches_qualified_name_only() {
        let xml = br#"<r:Root xmlns:r="urn:rates"><r:Value>1,5</r:Value><Value>2,5</Value></r:Root>"#;
        let values = element_texts(xml, "Value").unwrap();
        assert_eq!(values, vec!["2,5"]);
    }

    #[test]
    fn test_nested_text_counts_for_enclosing_match() {
        let xml = br#"<Root><Value>1<Value>2</Value></Value></Root>"#;
        let values = element_texts(xml, "Value").unwrap();
        assert_eq!(values, vec!["12", "2"]);
    }

    #[test]
    fn test_empty_element_yields_empty_text() {
        let values = element_texts(b"<Root><Value/></Root>", "Value").unwrap();
        assert_eq!(values, vec![""]);
    }

    #[test]
    fn test_mismatched_end_tag_is_error() {
        let result = element_texts(b"<ValCurs><Record></ValCurs>", "Value");
        assert!(matches!(result, Err(XmlError::Syntax(_))));
    }

    #[test]
    fn test_unclosed_document_is_error() {
        let result = element_texts(b"<ValCurs><Record><Value>1,0</Value>", "Value");
        assert!(result.is_err());
    }

    #[test]
    fn test_non_xml_body_is_error() {
        let result = element_texts(b"Service Unavailable", "Value");
        assert!(matches!(result, Err(XmlError::ContentOutsideRoot)));
    }

    #[test]
    fn test_empty_body_is_error() {
        let result = element_texts(b"", "Value");
        assert!(matches!(result, Err(XmlError::NoRootElement)));
    }

    const VALUES: &str = "<Value>1,0</Value><Value>2,0</Value>";

    #[test]
    fn test_second_root_is_error() {
        let xml = format!("<ValCurs></ValCurs><ValCurs>{VALUES}</ValCurs>");
        let result = element_texts(xml.as_bytes(), "Value");
        assert!(matches!(result, Err(XmlError::MultipleRootElements)));

        let result = element_texts(b"<ValCurs/><ValCurs/>", "Value");
        assert!(matches!(result, Err(XmlError::MultipleRootElements)));
    }

    #[test]
    fn test_text_before_root_is_error() {
        let xml = format!("garbage<ValCurs>{VALUES}</ValCurs>");
        let result = element_texts(xml.as_bytes(), "Value");
        assert!(matches!(result, Err(XmlError::ContentOutsideRoot)));
    }

    #[test]
    fn test_text_after_root_is_error() {
        let xml = format!("<ValCurs>{VALUES}</ValCurs>trailing");
        let result = element_texts(xml.as_bytes(), "Value");
        assert!(matches!(result, Err(XmlError::ContentOutsideRoot)));
    }

    #[test]
    fn test_invalid_attributes_are_errors() {
        for open_tag in [
            r#"<ValCurs a=1>"#,
            r#"<ValCurs a="1" a="2">"#,
            r#"<ValCurs a="&bogus;">"#,
        ] {
            let xml = format!("{open_tag}{VALUES}</ValCurs>");
            let result = element_texts(xml.as_bytes(), "Value");
            assert!(matches!(result, Err(XmlError::Syntax(_))), "{open_tag}");
        }
    }

    #[test]
    fn test_undefined_entity_outside_value_is_error() {
        let xml = format!("<ValCurs>&bogus;{VALUES}</ValCurs>");
        let result = element_texts(xml.as_bytes(), "Value");
        assert!(matches!(result, Err(XmlError::Syntax(_))));
    }

    #[test]
    fn test_predefined_entities_are_accepted() {
        let xml = br#"<ValCurs name="A &amp; B">x &lt; y<Value>1,0</Value></ValCurs>"#;
        let values = element_texts(xml, "Value").unwrap();
        assert_eq!(values, vec!["1,0"]);
    }
}
