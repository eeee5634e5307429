//! Integration tests for the metadata document reader.

use dicom_xml::{XmlError, parse};
use proptest::prelude::*;
use quick_xml::escape::escape;

fn document(attributes: &[(String, String, Option<String>)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<NativeDicomModel xml:space=\"preserve\">\n",
    );
    for (tag, keyword, value) in attributes {
        match value {
            Some(value) => xml.push_str(&format!(
                "<DicomAttribute keyword=\"{keyword}\" tag=\"{tag}\" vr=\"LO\"><Value number=\"1\">{}</Value></DicomAttribute>\n",
                escape(value.as_str())
            )),
            None => xml.push_str(&format!(
                "<DicomAttribute keyword=\"{keyword}\" tag=\"{tag}\" vr=\"LO\"/>\n"
            )),
        }
    }
    xml.push_str("</NativeDicomModel>");
    xml
}

#[test]
fn sequence_items_are_not_top_level_attributes() {
    let xml = r#"<NativeDicomModel>
  <DicomAttribute keyword="ReferencedImageSequence" tag="00081140" vr="SQ">
    <Item number="1">
      <DicomAttribute keyword="ReferencedSOPInstanceUID" tag="00081155" vr="UI"><Value number="1">1.2.3</Value></DicomAttribute>
    </Item>
  </DicomAttribute>
  <DicomAttribute keyword="Modality" tag="00080060" vr="CS"><Value number="1">MR</Value></DicomAttribute>
</NativeDicomModel>"#;
    let attrs = parse(xml).unwrap();
    assert!(attrs.has_keyword("ReferencedImageSequence"));
    assert_eq!(attrs.keyword_value("ReferencedImageSequence"), None);
    assert!(!attrs.has_keyword("ReferencedSOPInstanceUID"));
    assert!(!attrs.has_tag("00081155"));
    assert_eq!(attrs.keyword_value("Modality"), Some("MR"));
}

#[test]
fn first_value_of_multi_valued_attribute() {
    let xml = r#"<NativeDicomModel><DicomAttribute keyword="ImageType" tag="00080008" vr="CS"><Value number="1">ORIGINAL</Value><Value number="2">PRIMARY</Value></DicomAttribute></NativeDicomModel>"#;
    assert_eq!(parse(xml).unwrap().keyword_value("ImageType"), Some("ORIGINAL"));
}

#[test]
fn private_attribute_indexed_by_tag_only() {
    let xml = r#"<NativeDicomModel><DicomAttribute tag="00291010" vr="OB" privateCreator="SIEMENS CSA HEADER"><Value number="1">x</Value></DicomAttribute></NativeDicomModel>"#;
    let attrs = parse(xml).unwrap();
    assert_eq!(attrs.tag_value("00291010"), Some("x"));
    assert_eq!(attrs.tag_count(), 1);
    assert_eq!(attrs.keyword_count(), 0);
}

#[test]
fn repeated_attribute_keeps_last_value() {
    let xml = r#"<NativeDicomModel><DicomAttribute keyword="Manufacturer" tag="00080070" vr="LO"><Value number="1">SIEMENS</Value></DicomAttribute><DicomAttribute keyword="Manufacturer" tag="00080070" vr="LO"><Value number="1">GE</Value></DicomAttribute></NativeDicomModel>"#;
    let attrs = parse(xml).unwrap();
    assert_eq!(attrs.keyword_value("Manufacturer"), Some("GE"));
    assert_eq!(attrs.tag_value("00080070"), Some("GE"));
}

#[test]
fn cdata_is_verbatim() {
    let xml = r#"<NativeDicomModel><DicomAttribute keyword="ImageComments" tag="00204000" vr="LT"><Value number="1"><![CDATA[a < b]]></Value></DicomAttribute></NativeDicomModel>"#;
    assert_eq!(parse(xml).unwrap().keyword_value("ImageComments"), Some("a < b"));
}

#[test]
fn second_root_is_trailing_content() {
    let err = parse("<NativeDicomModel/><NativeDicomModel/>").unwrap_err();
    assert!(matches!(err, XmlError::TrailingContent { .. }));
}

#[test]
fn unknown_entity_is_reported() {
    let xml = r#"<NativeDicomModel><DicomAttribute keyword="A" tag="00000001"><Value>&bogus;</Value></DicomAttribute></NativeDicomModel>"#;
    assert!(matches!(
        parse(xml).unwrap_err(),
        XmlError::UnknownEntity { ref name, .. } if name == "bogus"
    ));
}

proptest! {
    #[test]
    fn parse_is_deterministic_and_reads_every_value(
        entries in prop::collection::btree_map(
            "[0-9A-F]{8}",
            prop::option::of("[ -~]{0,24}"),
            1..10,
        )
    ) {
        let attributes: Vec<(String, String, Option<String>)> = entries
            .iter()
            .enumerate()
            .map(|(idx, (tag, value))| (tag.clone(), format!("Keyword{idx}"), value.clone()))
            .collect();
        let xml = document(&attributes);

        let first = parse(&xml).unwrap();
        let second = parse(&xml).unwrap();
        prop_assert_eq!(&first, &second);

        for (tag, keyword, value) in &attributes {
            prop_assert_eq!(first.tag_value(tag), value.as_deref());
            prop_assert_eq!(first.keyword_value(keyword), value.as_deref());
            prop_assert!(first.has_tag(tag));
            prop_assert_eq!(first.keyword_value(tag), None);
        }
    }
}
