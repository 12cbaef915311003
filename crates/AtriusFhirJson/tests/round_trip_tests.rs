#![cfg(feature = "STU3")]

mod common;

use atrius_fhir_json::{UnmarshalOptions, Unmarshaler};
use atrius_fhir_lib::stu3::CATALOG;

/// Unmarshals by `resourceType` and marshals again; the bytes must survive.
fn assert_round_trip(json: &str) {
    common::init_tracing();
    let options = UnmarshalOptions::strict();
    let resource = Unmarshaler::new(&CATALOG, &options)
        .unmarshal(json.as_bytes(), None)
        .unwrap_or_else(|e| panic!("unmarshal of {} failed: {}", json, e));
    assert_eq!(common::to_json(resource.as_ref()), json);
}

#[test]
fn test_simple_resources() {
    assert_round_trip(r#"{"id":"final","resourceType":"PaymentNotice"}"#);
    assert_round_trip(r#"{"active":true,"resourceType":"Patient"}"#);
    assert_round_trip(r#"{"resourceType":"Patient"}"#);
}

#[test]
fn test_underscore_records() {
    assert_round_trip(r#"{"_active":{"id":"is-active"},"active":true,"resourceType":"Patient"}"#);
    assert_round_trip(concat!(
        r#"{"_active":{"extension":["#,
        r#"{"id":"exta","url":"/ext/a","valueString":"extended"},"#,
        r#"{"id":"extb","url":"/ext/b","valueBoolean":false}"#,
        r#"]},"active":false,"resourceType":"Patient"}"#
    ));
    assert_round_trip(r#"{"_birthDate":{"id":"bd"},"resourceType":"Patient"}"#);
}

#[test]
fn test_repeated_primitives() {
    assert_round_trip(r#"{"name":[{"given":["Mary","Jane"]}],"resourceType":"Patient"}"#);
    assert_round_trip(
        r#"{"name":[{"_given":[null,{"id":"middle"}],"given":["Mary","Jane"]}],"resourceType":"Patient"}"#,
    );
    assert_round_trip(
        r#"{"name":[{"_given":[{"id":"g0"},null],"given":[null,"Jane"]}],"resourceType":"Patient"}"#,
    );
}

#[test]
fn test_choices() {
    assert_round_trip(r#"{"deceasedBoolean":true,"resourceType":"Patient"}"#);
    assert_round_trip(r#"{"deceasedDateTime":"2015-02-07T13:28:17-05:00","resourceType":"Patient"}"#);
    assert_round_trip(r#"{"multipleBirthInteger":2,"resourceType":"Patient"}"#);
}

#[test]
fn test_temporal_precision_survives() {
    for birth_date in ["1986", "1986-10", "1986-10-18"] {
        assert_round_trip(&format!(
            r#"{{"birthDate":"{}","resourceType":"Patient"}}"#,
            birth_date
        ));
    }
    assert_round_trip(
        r#"{"issued":"2013-04-03T15:30:10.123+01:00","resourceType":"Observation","valueTime":"09:30:00"}"#,
    );
    assert_round_trip(r#"{"effectiveDateTime":"2013-04-02T10:30:10Z","resourceType":"Observation"}"#);
}

#[test]
fn test_fraction_digits_survive() {
    for fraction in ["5", "50", "1234", "123456"] {
        assert_round_trip(&format!(
            r#"{{"deceasedDateTime":"2017-01-01T00:00:00.{}Z","resourceType":"Patient"}}"#,
            fraction
        ));
    }
    assert_round_trip(
        r#"{"issued":"2017-01-01T00:00:00.1234-05:00","resourceType":"Observation","valueTime":"09:30:00.5"}"#,
    );
}

#[test]
fn test_decimal_text_survives() {
    for value in ["0.000", "0.14285700000", "-3.14159", "42", "1e400"] {
        assert_round_trip(&format!(
            r#"{{"resourceType":"Observation","valueQuantity":{{"value":{}}}}}"#,
            value
        ));
    }
}

#[test]
fn test_full_observation() {
    assert_round_trip(concat!(
        r#"{"category":[{"coding":[{"code":"vital-signs","system":"http://hl7.org/fhir/observation-category"}]}],"#,
        r#""code":{"coding":[{"code":"8310-5","display":"Body temperature","system":"http://loinc.org"}],"text":"Body temperature"},"#,
        r#""effectivePeriod":{"end":"2013-04-02T10:45:00Z","start":"2013-04-02T10:30:00Z"},"#,
        r#""id":"body-temp","#,
        r#""meta":{"lastUpdated":"2013-04-03T15:30:10.000Z","profile":["http://hl7.org/fhir/StructureDefinition/vitalsigns"]},"#,
        r#""resourceType":"Observation","#,
        r#""status":"final","#,
        r#""subject":{"display":"Peter James Chalmers","reference":"Patient/example"},"#,
        r#""valueQuantity":{"code":"Cel","system":"http://unitsofmeasure.org","unit":"C","value":36.5}}"#
    ));
}

#[test]
fn test_nested_composites_and_extensions() {
    assert_round_trip(concat!(
        r#"{"extension":[{"extension":[{"url":"/inner","valueCode":"x"}],"url":"/outer"},"#,
        r#"{"url":"/period","valuePeriod":{"start":"2011"}}],"#,
        r#""identifier":[{"assigner":{"display":"Acme"},"system":"urn:oid:1.2.36.146.595.217.0.1","use":"usual","value":"12345"}],"#,
        r#""resourceType":"Patient","#,
        r#""telecom":[{"rank":1,"system":"phone","value":"(03) 5555 6473"}]}"#
    ));
}

#[test]
fn test_binary_and_uris() {
    assert_round_trip(r#"{"photo":[{"contentType":"image/gif","data":"Zm9vAGJhcg=="}],"resourceType":"Patient"}"#);
}
