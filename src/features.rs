//! Feature catalog, sample values and input parsing
//!
//! The Dry Bean model takes 16 morphological measurements in a fixed order.
//! Values arrive as raw text from the page and are turned into
//! [`FeatureVector`]s here, before anything touches the network.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClassifierError, Result};

pub const INVALID_FEATURES_MESSAGE: &str = "Please enter valid numbers for all features";
pub const EMPTY_BATCH_MESSAGE: &str = "Please enter data for batch prediction";
pub const BATCH_FORMAT_MESSAGE: &str = "Invalid batch format. Please use array of arrays format.";

/// A named model input with its tooltip text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Model inputs in positional order
pub const BEAN_FEATURES: [FeatureSpec; 16] = [
    FeatureSpec { name: "Area", description: "Total area of the bean in pixels" },
    FeatureSpec { name: "Perimeter", description: "Total perimeter length of the bean" },
    FeatureSpec { name: "MajorAxisLength", description: "Length of the longest axis" },
    FeatureSpec { name: "MinorAxisLength", description: "Length of the shortest axis" },
    FeatureSpec { name: "AspectRation", description: "Ratio of major to minor axis" },
    FeatureSpec { name: "Eccentricity", description: "Measure of how circular the bean is" },
    FeatureSpec { name: "ConvexArea", description: "Area of the convex hull" },
    FeatureSpec { name: "EquivDiameter", description: "Diameter of a circle with same area" },
    FeatureSpec { name: "Extent", description: "Ratio of pixels in bounding box" },
    FeatureSpec { name: "Solidity", description: "Ratio of pixels in convex hull" },
    FeatureSpec { name: "Roundness", description: "Circularity measure" },
    FeatureSpec { name: "Compactness", description: "Compactness measure" },
    FeatureSpec { name: "ShapeFactor1", description: "Shape factor 1" },
    FeatureSpec { name: "ShapeFactor2", description: "Shape factor 2" },
    FeatureSpec { name: "ShapeFactor3", description: "Shape factor 3" },
    FeatureSpec { name: "ShapeFactor4", description: "Shape factor 4" },
];

/// Average Dry Bean measurements used by "Load Sample Data"
pub const SAMPLE_VALUES: [f64; 16] = [
    42000.0, 750.0, 300.0, 180.0, 1.67, 0.85, 43000.0, 231.0,
    0.75, 0.98, 0.85, 0.92, 0.45, 0.65, 0.35, 0.55,
];

/// Ordered numeric input to the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Parse a single field value. Surrounding whitespace is ignored; the
/// remainder must be a finite number.
pub fn parse_feature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse every field in page order. One bad field rejects the whole vector.
pub fn parse_feature_values<S: AsRef<str>>(raw: &[S]) -> Result<FeatureVector> {
    raw.iter()
        .map(|value| parse_feature(value.as_ref()))
        .collect::<Option<Vec<f64>>>()
        .map(FeatureVector)
        .ok_or_else(|| ClassifierError::Validation(INVALID_FEATURES_MESSAGE.to_string()))
}

/// Parse batch text: a JSON array whose elements are arrays of numbers.
pub fn parse_batch_input(text: &str) -> Result<Vec<FeatureVector>> {
    if text.trim().is_empty() {
        return Err(ClassifierError::Validation(EMPTY_BATCH_MESSAGE.to_string()));
    }

    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        ClassifierError::Validation(format!("{} ({})", BATCH_FORMAT_MESSAGE, e))
    })?;

    let format_error = || ClassifierError::Validation(BATCH_FORMAT_MESSAGE.to_string());

    let Value::Array(instances) = parsed else {
        return Err(format_error());
    };

    instances
        .iter()
        .map(|instance| {
            let Value::Array(values) = instance else {
                return Err(format_error());
            };
            values
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()
                .map(FeatureVector)
                .ok_or_else(format_error)
        })
        .collect()
}

/// Render a value for an input field. Integral values drop the fraction so
/// `42000.0` shows as `42000`.
pub fn format_field_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_sample_length() {
        assert_eq!(BEAN_FEATURES.len(), SAMPLE_VALUES.len());
        assert_eq!(BEAN_FEATURES[0].name, "Area");
        assert_eq!(BEAN_FEATURES[15].name, "ShapeFactor4");
    }

    #[test]
    fn test_parse_feature_values_in_order() {
        let vector = parse_feature_values(&["1.5", " 2 ", "-3e2"]).unwrap();
        assert_eq!(vector.as_slice(), &[1.5, 2.0, -300.0]);
    }

    #[test]
    fn test_parse_feature_values_rejects_any_bad_field() {
        for bad in ["", "abc", "12abc", "NaN", "inf"] {
            let err = parse_feature_values(&["1", bad, "3"]).unwrap_err();
            assert!(matches!(err, ClassifierError::Validation(ref m) if m == INVALID_FEATURES_MESSAGE));
        }
    }

    #[test]
    fn test_feature_vector_serializes_as_array() {
        let vector = FeatureVector::new(vec![1.0, 0.5]);
        assert_eq!(serde_json::to_string(&vector).unwrap(), "[1.0,0.5]");
    }

    #[test]
    fn test_parse_batch_input() {
        let batch = parse_batch_input("[[1, 2.5], [3]]").unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].as_slice(), &[1.0, 2.5]);
        assert_eq!(batch[1].as_slice(), &[3.0]);

        assert!(parse_batch_input("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_batch_input_rejects_wrong_shapes() {
        for bad in ["[1, 2]", "{\"instances\": []}", "[[1], 2]", "[[\"a\"]]", "[[1, null]]"] {
            let err = parse_batch_input(bad).unwrap_err();
            assert!(
                matches!(err, ClassifierError::Validation(ref m) if m == BATCH_FORMAT_MESSAGE),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_batch_input_blank_and_malformed() {
        let err = parse_batch_input("   ").unwrap_err();
        assert_eq!(err.to_string(), EMPTY_BATCH_MESSAGE);

        let err = parse_batch_input("[[1, 2]").unwrap_err();
        assert!(err.to_string().starts_with(BATCH_FORMAT_MESSAGE));
    }

    #[test]
    fn test_format_field_value() {
        assert_eq!(format_field_value(42000.0), "42000");
        assert_eq!(format_field_value(1.67), "1.67");
        assert_eq!(format_field_value(-0.5), "-0.5");
    }
}
