//! WaterML 2.0 timeseries extraction
//!
//! The WFS responses wrap each forecast parameter in a
//! `wml2:MeasurementTimeseries` element whose `gml:id` ends in the
//! parameter name. Only the time/value pairs are of interest here;
//! matching is done on local element names so namespace prefixes do not
//! matter.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{FmiError, FmiResult};

/// Extract the (time, value) points of one parameter series.
///
/// Fails if the document holds no series for `parameter`, or if a point
/// is structurally broken. An empty series element parses to an empty
/// vector.
pub fn parse_points(xml: &str, parameter: &str) -> FmiResult<Vec<(DateTime<Utc>, f64)>> {
    let wanted = format!("mts-1-1-{parameter}");

    #[derive(PartialEq)]
    enum Capture {
        None,
        Time,
        Value,
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_series = false;
    let mut found = false;
    let mut capture = Capture::None;
    let mut pending_time: Option<DateTime<Utc>> = None;
    let mut points = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) => match local_name(element.name().as_ref()) {
                b"MeasurementTimeseries" => {
                    in_series = series_id(&element)?.as_deref() == Some(wanted.as_str());
                    if in_series {
                        found = true;
                    }
                }
                b"time" if in_series => capture = Capture::Time,
                b"value" if in_series => capture = Capture::Value,
                _ => {}
            },
            Event::End(element) => match local_name(element.name().as_ref()) {
                b"MeasurementTimeseries" => in_series = false,
                b"time" | b"value" => capture = Capture::None,
                _ => {}
            },
            Event::Text(text) => match capture {
                Capture::Time => {
                    let raw = text.unescape()?;
                    let time = DateTime::parse_from_rfc3339(raw.trim()).map_err(|e| {
                        FmiError::Malformed(format!("bad timestamp {:?}: {e}", raw.trim()))
                    })?;
                    pending_time = Some(time.with_timezone(&Utc));
                }
                Capture::Value => {
                    let raw = text.unescape()?;
                    let value: f64 = raw.trim().parse().map_err(|e| {
                        FmiError::Malformed(format!("bad value {:?}: {e}", raw.trim()))
                    })?;
                    let time = pending_time
                        .take()
                        .ok_or_else(|| FmiError::Malformed("value without a time".to_string()))?;
                    points.push((time, value));
                }
                Capture::None => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !found {
        return Err(FmiError::MissingSeries(parameter.to_string()));
    }
    Ok(points)
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

fn series_id(element: &BytesStart) -> FmiResult<Option<String>> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| FmiError::Malformed(e.to_string()))?;
        if local_name(attribute.key.as_ref()) == b"id" {
            return Ok(Some(String::from_utf8_lossy(&attribute.value).into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:wml2="http://www.opengis.net/waterml/2.0"
    xmlns:gml="http://www.opengis.net/gml/3.2">
  <wfs:member>
    <wml2:MeasurementTimeseries gml:id="mts-1-1-Pressure">
      <wml2:point>
        <wml2:MeasurementTVP>
          <wml2:time>2024-01-03T12:00:00Z</wml2:time>
          <wml2:value>1000.0</wml2:value>
        </wml2:MeasurementTVP>
      </wml2:point>
      <wml2:point>
        <wml2:MeasurementTVP>
          <wml2:time>2024-01-03T13:00:00Z</wml2:time>
          <wml2:value>1001.2</wml2:value>
        </wml2:MeasurementTVP>
      </wml2:point>
    </wml2:MeasurementTimeseries>
  </wfs:member>
  <wfs:member>
    <wml2:MeasurementTimeseries gml:id="mts-1-1-WindDirection">
      <wml2:point>
        <wml2:MeasurementTVP>
          <wml2:time>2024-01-03T12:00:00Z</wml2:time>
          <wml2:value>220.0</wml2:value>
        </wml2:MeasurementTVP>
      </wml2:point>
      <wml2:point>
        <wml2:MeasurementTVP>
          <wml2:time>2024-01-03T13:00:00Z</wml2:time>
          <wml2:value>225.5</wml2:value>
        </wml2:MeasurementTVP>
      </wml2:point>
    </wml2:MeasurementTimeseries>
  </wfs:member>
</wfs:FeatureCollection>"#;

    #[test]
    fn test_extracts_requested_series_only() {
        let points = parse_points(RESPONSE, "Pressure").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(
            points[0].0,
            Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
        );
        assert_eq!(points[0].1, 1000.0);
        assert_eq!(points[1].1, 1001.2);

        let points = parse_points(RESPONSE, "WindDirection").unwrap();
        assert_eq!(points[1].1, 225.5);
    }

    #[test]
    fn test_missing_series_is_an_error() {
        let error = parse_points(RESPONSE, "WindSpeedMS").unwrap_err();
        assert!(matches!(error, FmiError::MissingSeries(ref p) if p == "WindSpeedMS"));
    }

    #[test]
    fn test_nan_values_parse() {
        // FMI reports missing points as NaN values
        let xml = r#"<wml2:MeasurementTimeseries gml:id="mts-1-1-SeaLevelN2000">
            <wml2:point><wml2:MeasurementTVP>
              <wml2:time>2024-01-03T12:00:00Z</wml2:time>
              <wml2:value>NaN</wml2:value>
            </wml2:MeasurementTVP></wml2:point>
          </wml2:MeasurementTimeseries>"#;
        let points = parse_points(xml, "SeaLevelN2000").unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].1.is_nan());
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let xml = r#"<wml2:MeasurementTimeseries gml:id="mts-1-1-Pressure">
            <wml2:point><wml2:MeasurementTVP>
              <wml2:time>yesterday</wml2:time>
              <wml2:value>1000.0</wml2:value>
            </wml2:MeasurementTVP></wml2:point>
          </wml2:MeasurementTimeseries>"#;
        assert!(matches!(
            parse_points(xml, "Pressure").unwrap_err(),
            FmiError::Malformed(_)
        ));
    }
}
