//! Projects plotly-style trace objects onto simple series a cell-based
//! renderer can draw. Nothing here mutates the [`ChartSpec`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;

use crate::chart::ChartSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceKind {
    Line,
    Scatter,
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: TraceKind,
    /// Numeric `(x, y)` pairs; categorical x values are replaced by their index
    pub points: Vec<(f64, f64)>,
    /// Labelled values for bars and pie slices
    pub slices: Vec<(String, f64)>,
    pub color: Option<String>,
}

/// Layout title, whether given as a plain string or as `{text: ...}`
pub fn title(spec: &ChartSpec) -> Option<String> {
    let title = match spec.layout.get("title")? {
        Value::String(text) => text.clone(),
        Value::Object(title) => title.get("text")?.as_str()?.to_string(),
        _ => return None,
    };
    (!title.trim().is_empty()).then_some(title)
}

/// Whether the y axis should be drawn top-down (e.g. championship positions)
pub fn y_reversed(spec: &ChartSpec) -> bool {
    spec.layout
        .get("yaxis")
        .and_then(|axis| axis.get("autorange"))
        .and_then(Value::as_str)
        == Some("reversed")
}

pub fn series(spec: &ChartSpec) -> Vec<Series> {
    spec.data
        .iter()
        .enumerate()
        .filter_map(|(index, trace)| project(index, trace))
        .collect()
}

/// Bounding box over every point of every series, padded when flat
pub fn bounds(series: &[Series]) -> Option<([f64; 2], [f64; 2])> {
    let mut points = series.iter().flat_map(|series| series.points.iter());
    let &(x, y) = points.next()?;
    let (mut x_bounds, mut y_bounds) = ([x, x], [y, y]);
    for &(x, y) in points {
        x_bounds = [x_bounds[0].min(x), x_bounds[1].max(x)];
        y_bounds = [y_bounds[0].min(y), y_bounds[1].max(y)];
    }
    Some((pad(x_bounds), pad(y_bounds)))
}

fn pad(bounds: [f64; 2]) -> [f64; 2] {
    if (bounds[1] - bounds[0]).abs() < f64::EPSILON {
        [bounds[0] - 1.0, bounds[1] + 1.0]
    } else {
        bounds
    }
}

fn project(index: usize, trace: &Value) -> Option<Series> {
    let trace = trace.as_object()?;
    let kind = match trace.get("type").and_then(Value::as_str).unwrap_or("scatter") {
        "scatter" | "scattergl" => {
            let mode = trace.get("mode").and_then(Value::as_str).unwrap_or("lines");
            if mode.contains("lines") {
                TraceKind::Line
            } else {
                TraceKind::Scatter
            }
        }
        "bar" => TraceKind::Bar,
        "pie" => TraceKind::Pie,
        _ => return None,
    };

    let name = trace
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("trace {}", index + 1), ToString::to_string);

    let color = trace
        .get("marker")
        .and_then(|marker| marker.get("color"))
        .or_else(|| trace.get("line").and_then(|line| line.get("color")))
        .and_then(Value::as_str)
        .map(ToString::to_string);

    let series = if kind == TraceKind::Pie {
        let labels = labels(trace.get("labels")?)?;
        let values = numbers(trace.get("values")?)?;
        Series {
            name,
            kind,
            points: Vec::new(),
            slices: labelled(labels, values),
            color,
        }
    } else {
        let y = numbers(trace.get("y")?)?;
        let x_labels = trace.get("x").and_then(labels);
        let x_numbers = trace.get("x").and_then(numbers);
        let points = y
            .iter()
            .enumerate()
            .filter_map(|(i, y)| {
                #[allow(clippy::cast_precision_loss)]
                let x = x_numbers
                    .as_ref()
                    .and_then(|xs| xs.get(i).copied().flatten())
                    .unwrap_or(i as f64);
                Some((x, (*y)?))
            })
            .collect();
        let slices = x_labels
            .map(|labels| labelled(labels, y))
            .unwrap_or_default();
        Series {
            name,
            kind,
            points,
            slices,
            color,
        }
    };

    Some(series)
}

fn labelled(labels: Vec<String>, values: Vec<Option<f64>>) -> Vec<(String, f64)> {
    labels
        .into_iter()
        .zip(values)
        .filter_map(|(label, value)| Some((label, value?)))
        .collect()
}

fn labels(value: &Value) -> Option<Vec<String>> {
    if let Some(decoded) = typed_array(value) {
        return Some(decoded.into_iter().map(format_number).collect());
    }
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.as_f64().map_or_else(String::new, format_number),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn numbers(value: &Value) -> Option<Vec<Option<f64>>> {
    if let Some(decoded) = typed_array(value) {
        return Some(
            decoded
                .into_iter()
                .map(|number| Some(number).filter(|number| number.is_finite()))
                .collect(),
        );
    }
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            })
            .map(|number| number.filter(|number| number.is_finite()))
            .collect(),
    )
}

/// Decodes plotly's `{dtype, bdata}` little-endian base64 arrays
fn typed_array(value: &Value) -> Option<Vec<f64>> {
    let object = value.as_object()?;
    let dtype = object.get("dtype")?.as_str()?;
    let bytes = STANDARD.decode(object.get("bdata")?.as_str()?).ok()?;

    macro_rules! decode {
        ($ty:ty) => {{
            const WIDTH: usize = std::mem::size_of::<$ty>();
            bytes
                .chunks_exact(WIDTH)
                .filter_map(|chunk| <[u8; WIDTH]>::try_from(chunk).ok())
                .map(|chunk| f64::from(<$ty>::from_le_bytes(chunk)))
                .collect()
        }};
    }

    let values = match dtype.trim_start_matches(['<', '|']) {
        "f8" => decode!(f64),
        "f4" => decode!(f32),
        "i1" => decode!(i8),
        "u1" => decode!(u8),
        "i2" => decode!(i16),
        "u2" => decode!(u16),
        "i4" => decode!(i32),
        "u4" => decode!(u32),
        _ => return None,
    };
    Some(values)
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}
