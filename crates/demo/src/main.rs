// File: crates/demo/src/main.rs
// Summary: Renders a chart from JSON, a ```chart block or a CSV table to PNG plus legend HTML.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use inline_chart_core::telemetry::init_default_tracing;
use inline_chart_core::{
    theme, ChartConfig, ChartKind, ChartView, LegendSurface, LogicalSize, MarkupLegend, Palette,
    RenderOptions, Series,
};
use tracing::{info, warn};

const SAMPLE: &str = r##"{
  "type": "line",
  "data": {
    "labels": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    "datasets": [
      { "label": "Requests", "data": [120, 190, 150, 220, 180, 90, 60], "tension": 0.4, "showPoints": true },
      { "label": "Errors", "data": [5, 9, 4, 12, 7, 2, 1], "borderColor": "#ea4335" }
    ]
  },
  "options": { "title": { "text": "Weekly traffic" } }
}"##;

struct Args {
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    width: f32,
    height: f32,
    dpr: f32,
    theme: String,
    palette: Option<String>,
    kind: Option<ChartKind>,
}

fn main() -> Result<()> {
    let _ = init_default_tracing();
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.input {
        Some(path) => load_config(path, args.kind)
            .with_context(|| format!("failed to load chart from '{}'", path.display()))?,
        None => {
            println!("No input given; rendering the built-in sample.");
            ChartConfig::from_json(SAMPLE).context("parsing built-in sample")?
        }
    };
    if let Some(kind) = args.kind {
        config.kind = kind;
    }

    let legend = Rc::new(RefCell::new(MarkupLegend::new()));
    let sink: Box<dyn LegendSurface> = Box::new(legend.clone());
    let mut opts = RenderOptions::default().with_theme(theme::find(&args.theme));
    if let Some(list) = &args.palette {
        opts = opts.with_palette(Palette::from_css(list.split(',').map(str::trim)));
    }
    let from_csv = args
        .input
        .as_deref()
        .is_some_and(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")));
    let json = config.to_json_pretty().context("serializing chart")?;
    let size = LogicalSize::new(args.width, args.height);
    let mut view = ChartView::mount(size, args.dpr, config, Some(sink), opts)
        .context("creating chart surface")?;

    let out = args.out.clone().unwrap_or_else(|| out_name(args.input.as_deref()));
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let png = view.encode_png().context("encoding PNG")?;
    std::fs::write(&out, &png).with_context(|| format!("writing {}", out.display()))?;
    let (pw, ph) = view.physical_size();
    info!(path = %out.display(), width = pw, height = ph, "wrote chart");
    println!("Wrote {} ({pw}x{ph})", out.display());

    if let Some(err) = view.last_error() {
        warn!(error = %err, "chart rendered as an error indicator");
        bail!("chart config rejected: {err}");
    }

    let legend_path = out.with_extension("legend.html");
    std::fs::write(&legend_path, legend.borrow().markup())
        .with_context(|| format!("writing {}", legend_path.display()))?;
    println!("Wrote {}", legend_path.display());

    // CSV input: keep the equivalent chart block next to the image.
    if from_csv {
        let json_path = out.with_extension("json");
        std::fs::write(&json_path, json)
            .with_context(|| format!("writing {}", json_path.display()))?;
        println!("Wrote {}", json_path.display());
    }
    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args {
        input: None,
        out: None,
        width: 640.0,
        height: 300.0,
        dpr: 1.0,
        theme: "dark".to_string(),
        palette: None,
        kind: None,
    };
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--out" | "-o" => args.out = Some(PathBuf::from(value("--out")?)),
            "--width" => args.width = value("--width")?.parse().context("--width")?,
            "--height" => args.height = value("--height")?.parse().context("--height")?,
            "--dpr" => args.dpr = value("--dpr")?.parse().context("--dpr")?,
            "--theme" => args.theme = value("--theme")?,
            "--palette" => args.palette = Some(value("--palette")?),
            "--kind" => args.kind = Some(parse_kind(&value("--kind")?)?),
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            other => args.input = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

fn parse_kind(raw: &str) -> Result<ChartKind> {
    // Go through the config parser so the CLI accepts exactly the JSON type names.
    let snippet = format!(r#"{{ "type": "{}" }}"#, raw.trim().to_ascii_lowercase());
    ChartConfig::from_json(&snippet)
        .map(|c| c.kind)
        .with_context(|| format!("unknown chart type '{raw}'"))
}

fn load_config(path: &Path, kind: Option<ChartKind>) -> Result<ChartConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "csv" => {
            let rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_path(path)
                .with_context(|| format!("opening {}", path.display()))?;
            config_from_csv(rdr, kind.unwrap_or(ChartKind::Bar))
        }
        "json" => {
            let text = std::fs::read_to_string(path)?;
            Ok(ChartConfig::from_json(&text)?)
        }
        _ => {
            let text = std::fs::read_to_string(path)?;
            let block = extract_chart_block(&text).context("no ```chart block found")?;
            Ok(ChartConfig::from_json(block)?)
        }
    }
}

/// Body of the first fenced block tagged `chart`.
fn extract_chart_block(text: &str) -> Option<&str> {
    let start = text.find("```chart")?;
    let after_tag = &text[start + "```chart".len()..];
    let body_start = after_tag.find('\n')? + 1;
    let body = &after_tag[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// First column holds category labels; every other column becomes a series named by its header.
/// Rows with unparseable numbers are skipped.
fn config_from_csv<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    kind: ChartKind,
) -> Result<ChartConfig> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.len() < 2 {
        bail!("CSV needs a label column and at least one value column");
    }

    let mut labels = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parsed: Option<Vec<f64>> = (1..headers.len())
            .map(|i| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok()))
            .collect();
        let Some(values) = parsed else {
            warn!(row = row + 2, "skipping CSV row with missing or non-numeric values");
            continue;
        };
        labels.push(rec.get(0).unwrap_or("").trim().to_string());
        for (col, v) in columns.iter_mut().zip(values) {
            col.push(v);
        }
    }
    if labels.is_empty() {
        bail!("no usable rows in CSV");
    }

    let mut config = ChartConfig::new(kind).with_categories(labels);
    let series_columns = if kind.is_radial() { 1 } else { columns.len() };
    for (name, values) in headers[1..].iter().zip(columns).take(series_columns) {
        config = config.with_series(Series::from_numbers(&values).with_name(name.clone()));
    }
    Ok(config)
}

/// Output file name like target/out/chart_<stem>.png
fn out_name(input: Option<&Path>) -> PathBuf {
    let stem = input.and_then(|p| p.file_stem()).and_then(|s| s.to_str()).unwrap_or("sample");
    PathBuf::from("target/out").join(format!("chart_{stem}.png"))
}
