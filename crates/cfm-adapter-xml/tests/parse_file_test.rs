use cfm_adapter_xml::{Error, XmlParser};
use std::fs;

#[test]
fn parse_file_records_source() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("redSofaBed.xml");
    fs::write(
        &path,
        "<?xml version=\"1.0\"?>\n<product>\n  <name>Red Sofa Bed</name>\n</product>\n",
    )?;

    let doc = XmlParser::parse_file(&path)?;

    let source = doc.metadata.source.as_ref().expect("source recorded");
    assert!(source.source.ends_with("redSofaBed.xml"));
    assert_eq!(doc.metadata.version.as_deref(), Some("1.0"));
    assert_eq!(doc.metadata.encoding, None);
    assert_eq!(
        doc.find_first("name").and_then(|n| n.text()).as_deref(),
        Some("Red Sofa Bed")
    );
    Ok(())
}

#[test]
fn parse_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = XmlParser::parse_file(&dir.path().join("missing.xml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn parse_error_reports_position() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<product>\n  <name>Sofa</price>\n</product>\n")?;

    let err = XmlParser::parse_file(&path).unwrap_err();

    match err {
        Error::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
