// File: crates/chart-core/src/config.rs
// Summary: Declarative chart description (Chart.js-like JSON schema), builders and validation.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ChartError, ChartResult};

/// Series renderer family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
    Doughnut,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
        }
    }

    /// Pie and doughnut have no value axis.
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }

    /// Kinds whose series must line up with the category list.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Line)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `datasets[i].data`: a bare number or an `{x, y}` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Point { x: f64, y: f64 },
}

impl DataValue {
    /// Value-axis component; pairs contribute their `y`.
    pub fn y(&self) -> f64 {
        match *self {
            DataValue::Number(v) => v,
            DataValue::Point { y, .. } => y,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(v) => write!(f, "{v}"),
            DataValue::Point { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<(f64, f64)> for DataValue {
    fn from((x, y): (f64, f64)) -> Self {
        DataValue::Point { x, y }
    }
}

/// `backgroundColor` is either one color or one color per data item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerItem(Vec<String>),
}

impl ColorSpec {
    pub fn first(&self) -> Option<&str> {
        match self {
            ColorSpec::Single(c) => Some(c),
            ColorSpec::PerItem(v) => v.first().map(String::as_str),
        }
    }

    /// Color for item `index`; a single color applies to every item.
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            ColorSpec::Single(c) => Some(c),
            ColorSpec::PerItem(v) => v.get(index).map(String::as_str),
        }
    }
}

/// One named, styled sequence of values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "label", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "data", default)]
    pub values: Vec<DataValue>,
    #[serde(rename = "borderColor", default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(rename = "backgroundColor", default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<ColorSpec>,
    #[serde(rename = "tension", default, skip_serializing_if = "Option::is_none")]
    pub curve_tension: Option<f64>,
    #[serde(rename = "showPoints", default)]
    pub show_discrete_points: bool,
    #[serde(rename = "pointRadius", default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f32>,
}

impl Series {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values, ..Self::default() }
    }

    pub fn from_numbers(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(DataValue::Number).collect())
    }

    pub fn from_pairs(values: &[(f64, f64)]) -> Self {
        Self::new(values.iter().copied().map(DataValue::from).collect())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_fill(mut self, fill: ColorSpec) -> Self {
        self.fill_color = Some(fill);
        self
    }

    pub fn with_tension(mut self, tension: f64) -> Self {
        self.curve_tension = Some(tension);
        self
    }

    pub fn with_points(mut self, radius: Option<f32>) -> Self {
        self.show_discrete_points = true;
        self.point_radius = radius;
        self
    }

    /// Spline tension clamped to `[0, 1]`; zero means straight segments.
    pub fn tension(&self) -> f32 {
        match self.curve_tension {
            Some(t) if t.is_finite() => t.clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }

    /// Display name, falling back to a 1-based ordinal.
    pub fn display_name(&self, index: usize) -> Cow<'_, str> {
        match self.name.as_deref() {
            Some(n) => Cow::Borrowed(n),
            None => Cow::Owned(format!("Series {}", index + 1)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, deserialize_with = "labels_as_strings")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasets: Option<Vec<Series>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOptions>,
}

/// Full chart description as produced by the response parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData>,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            data: Some(ChartData { labels: Vec::new(), datasets: Some(Vec::new()) }),
            options: ChartOptions::default(),
        }
    }

    /// Parse the JSON body of a chart block.
    pub fn from_json(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_categories<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.get_or_insert_with(ChartData::default).labels =
            labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.data
            .get_or_insert_with(ChartData::default)
            .datasets
            .get_or_insert_with(Vec::new)
            .push(series);
        self
    }

    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.options.title = Some(TitleOptions { text: Some(text.into()) });
        self
    }

    pub fn categories(&self) -> &[String] {
        self.data.as_ref().map(|d| d.labels.as_slice()).unwrap_or(&[])
    }

    pub fn series(&self) -> &[Series] {
        self.data
            .as_ref()
            .and_then(|d| d.datasets.as_deref())
            .unwrap_or(&[])
    }

    pub fn title(&self) -> Option<&str> {
        self.options.title.as_ref().and_then(|t| t.text.as_deref()).filter(|t| !t.is_empty())
    }

    /// Check the structural invariants the renderers rely on.
    ///
    /// Bar and line series must have exactly one value per category; mismatches are
    /// reported, never clipped.
    pub fn validate(&self) -> ChartResult<()> {
        let data = self.data.as_ref().ok_or(ChartError::MissingData("data"))?;
        let datasets = data.datasets.as_ref().ok_or(ChartError::MissingData("datasets"))?;

        if self.kind.is_radial() && datasets.is_empty() {
            return Err(ChartError::MissingData("datasets"));
        }

        if self.kind.is_categorical() {
            let categories = data.labels.len();
            for (series_index, s) in datasets.iter().enumerate() {
                if s.values.len() != categories {
                    return Err(ChartError::LengthMismatch {
                        kind: self.kind,
                        series_index,
                        values: s.values.len(),
                        categories,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Labels sometimes arrive as bare numbers (`[1, 2, 3]`); keep them as text.
fn labels_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    let raw: Option<Vec<Label>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|l| match l {
            Label::Text(s) => s,
            Label::Number(n) => n.to_string(),
            Label::Flag(b) => b.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "type": "line",
        "data": {
            "labels": ["Q1", "Q2", "Q3"],
            "datasets": [
                { "label": "Revenue", "data": [1, 2.5, 3], "borderColor": "#ff0000",
                  "tension": 0.4, "showPoints": true, "pointRadius": 6 },
                { "data": [{"x": 1, "y": 2}, 3, {"x": 5, "y": -1}],
                  "backgroundColor": ["#111", "#222"] }
            ]
        },
        "options": { "title": { "text": "Growth" } }
    }"##;

    #[test]
    fn parses_chartjs_shape() {
        let cfg = ChartConfig::from_json(SAMPLE).expect("parse");
        assert_eq!(cfg.kind, ChartKind::Line);
        assert_eq!(cfg.categories(), ["Q1", "Q2", "Q3"]);
        assert_eq!(cfg.title(), Some("Growth"));

        let s0 = &cfg.series()[0];
        assert_eq!(s0.display_name(0), "Revenue");
        assert_eq!(s0.stroke_color.as_deref(), Some("#ff0000"));
        assert!((s0.tension() - 0.4).abs() < 1e-6);
        assert!(s0.show_discrete_points);
        assert_eq!(s0.point_radius, Some(6.0));

        let s1 = &cfg.series()[1];
        assert_eq!(s1.display_name(1), "Series 2");
        assert_eq!(s1.values[0], DataValue::Point { x: 1.0, y: 2.0 });
        assert_eq!(s1.values[1].y(), 3.0);
        assert_eq!(s1.fill_color.as_ref().and_then(|c| c.get(1)), Some("#222"));
        assert_eq!(s1.fill_color.as_ref().and_then(|c| c.get(2)), None);
        assert_eq!(s1.tension(), 0.0);
        cfg.validate().expect("valid");
    }

    #[test]
    fn numeric_labels_become_text() {
        let cfg = ChartConfig::from_json(
            r#"{"type":"bar","data":{"labels":[1, 2.5, "x"],"datasets":[{"data":[1,2,3]}]}}"#,
        )
        .expect("parse");
        assert_eq!(cfg.categories(), ["1", "2.5", "x"]);
    }

    #[test]
    fn missing_data_is_reported() {
        let cfg = ChartConfig::from_json(r#"{"type":"bar"}"#).expect("parse");
        assert!(matches!(cfg.validate(), Err(ChartError::MissingData("data"))));

        let json = r#"{"type":"bar","data":{"labels":["a"]}}"#;
        let cfg = ChartConfig::from_json(json).expect("parse");
        assert!(matches!(cfg.validate(), Err(ChartError::MissingData("datasets"))));
    }

    #[test]
    fn length_mismatch_is_an_error_for_categorical_kinds() {
        let cfg = ChartConfig::new(ChartKind::Bar)
            .with_categories(["a", "b", "c"])
            .with_series(Series::from_numbers(&[1.0, 2.0]));
        match cfg.validate() {
            Err(ChartError::LengthMismatch { series_index, values, categories, .. }) => {
                assert_eq!((series_index, values, categories), (0, 2, 3));
            }
            other => panic!("unexpected: {other:?}"),
        }

        let scatter = ChartConfig::new(ChartKind::Scatter)
            .with_categories(["a"])
            .with_series(Series::from_pairs(&[(0.0, 1.0), (1.0, 2.0)]));
        assert!(scatter.validate().is_ok());
    }

    #[test]
    fn unknown_kind_and_bad_json_fail_to_parse() {
        assert!(ChartConfig::from_json(r#"{"type":"radar","data":{}}"#).is_err());
        assert!(matches!(ChartConfig::from_json("{not json"), Err(ChartError::Parse(_))));
    }

    #[test]
    fn tension_is_clamped() {
        assert_eq!(Series::from_numbers(&[1.0]).with_tension(3.0).tension(), 1.0);
        assert_eq!(Series::from_numbers(&[1.0]).with_tension(-1.0).tension(), 0.0);
    }

    #[test]
    fn values_format_like_tooltips() {
        assert_eq!(DataValue::Number(10.0).to_string(), "10");
        assert_eq!(DataValue::Number(2.5).to_string(), "2.5");
        assert_eq!(DataValue::Point { x: 1.0, y: -2.5 }.to_string(), "(1, -2.5)");
    }
}
