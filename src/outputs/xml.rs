//! Shared helpers for the XML documents (RSS feed and sitemap).

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use std::error::Error;
use std::io::{Cursor, Write};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Start an indented document with the UTF-8 XML declaration already written.
pub fn new_document() -> Result<Writer<Cursor<Vec<u8>>>, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

/// Finish a document started with [`new_document`] and return its text.
pub fn finish_document(writer: Writer<Cursor<Vec<u8>>>) -> Result<String, Box<dyn Error>> {
    let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// Write `<name>text</name>`; `BytesText` escapes markup characters.
pub fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), Box<dyn Error>> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write a generated text file into the public directory, creating it if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_public_file(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).await?;
    }
    fs::write(path, contents).await?;
    info!(bytes = contents.len(), "Wrote public file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_escapes() {
        let mut writer = new_document().unwrap();
        text_element(&mut writer, "title", "Rust & <XML>").unwrap();
        let xml = finish_document(writer).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<title>Rust &amp; &lt;XML&gt;</title>"));
    }

    #[tokio::test]
    async fn test_write_public_file_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("public").join("robots.txt");
        write_public_file(&path, "User-agent: *\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "User-agent: *\n");
    }
}
