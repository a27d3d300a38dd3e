//! Tests for decoding QRDA XML into document trees.

use std::fs;

use qrda_ingest::{IngestError, IngestOptions, load_documents, parse_documents};
use qrda_model::{FieldPath, Node};

const SINGLE_PATIENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ClinicalDocument xmlns="urn:hl7-org:v3">
  <recordTarget>
    <patientRole>
      <id root="P1"/>
      <patient>
        <name><given>Jane</given><family>Doe</family></name>
        <administrativeGenderCode code="F"/>
        <birthTime value="19850315"/>
      </patient>
    </patientRole>
  </recordTarget>
  <component>
    <structuredBody>
      <component>
        <section>
          <entry>
            <observation>
              <code code="8480-6"/>
              <value value="120" unit="mm[Hg]"/>
            </observation>
          </entry>
          <entry>
            <observation>
              <code code="8462-4"/>
              <value value="80" unit="mm[Hg]"/>
            </observation>
          </entry>
        </section>
      </component>
    </structuredBody>
  </component>
</ClinicalDocument>
"#;

const ENTRIES: FieldPath =
    FieldPath::new(&["component", "structuredBody", "component", "section", "entry"]);

#[test]
fn decodes_record_target_and_entries() {
    let documents =
        parse_documents(SINGLE_PATIENT, "single.xml", &IngestOptions::default()).expect("parse");
    assert_eq!(documents.len(), 1);
    let document = &documents[0];
    assert_eq!(document.source, "single.xml");

    let root = &document.root;
    assert_eq!(
        root.text_at(FieldPath::new(&["recordTarget", "patientRole", "id", "_root"])),
        Some("P1")
    );
    assert_eq!(
        root.text_at(FieldPath::new(&[
            "recordTarget",
            "patientRole",
            "patient",
            "name",
            "given"
        ])),
        Some("Jane")
    );

    let entries = root.at(ENTRIES).expect("entries").items();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[1].text_at(FieldPath::new(&["observation", "value", "_unit"])),
        Some("mm[Hg]")
    );
}

#[test]
fn single_entry_is_still_a_sequence() {
    let xml = r#"<ClinicalDocument><component><structuredBody><component><section>
        <entry><observation><code code="X"/></observation></entry>
    </section></component></structuredBody></component></ClinicalDocument>"#;
    let documents = parse_documents(xml, "one.xml", &IngestOptions::default()).expect("parse");

    let entries = documents[0].root.at(ENTRIES).expect("entries");
    assert!(matches!(entries, Node::Element(_)));
    assert_eq!(entries.items().len(), 1);
}

#[test]
fn wrapped_documents_get_indexed_sources() {
    let xml = "<batch><ClinicalDocument><title>a</title></ClinicalDocument>\
               <ClinicalDocument><title>b</title></ClinicalDocument></batch>";
    let documents = parse_documents(xml, "batch.xml", &IngestOptions::default()).expect("parse");

    let sources: Vec<_> = documents.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["batch.xml#1", "batch.xml#2"]);
    assert_eq!(documents[1].root.field("title"), Some(&Node::text("b")));
}

#[test]
fn custom_row_tag() {
    let xml = "<Report><Record><title>a</title></Record></Report>";
    let options = IngestOptions::default().with_row_tag("Record");
    let documents = parse_documents(xml, "custom.xml", &options).expect("parse");
    assert_eq!(documents.len(), 1);
}

#[test]
fn missing_row_tag_is_reported() {
    let err = parse_documents("<Report/>", "empty.xml", &IngestOptions::default())
        .expect_err("should fail");
    assert!(matches!(err, IngestError::NoDocuments { .. }));
}

#[test]
fn mismatched_tags_are_reported() {
    let err = parse_documents(
        "<ClinicalDocument><entry></section></ClinicalDocument>",
        "bad.xml",
        &IngestOptions::default(),
    )
    .expect_err("should fail");
    assert!(matches!(err, IngestError::XmlParse { .. }));
}

#[test]
fn loads_documents_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("single.xml");
    fs::write(&path, SINGLE_PATIENT).expect("write xml");

    let documents = load_documents(&path, &IngestOptions::default()).expect("load");
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].source, path.display().to_string());

    let err = load_documents(&dir.path().join("missing.xml"), &IngestOptions::default())
        .expect_err("should fail");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
