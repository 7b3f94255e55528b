use clap::{Parser, ValueEnum};
use csv::ReaderBuilder;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;
use thruster_lab::physics::units::{kg_s_to_mg_s, n_to_mn};
use thruster_lab::propulsion::ThrusterKind;
use thruster_lab::sweep::analysis::{SweepRecord, gases, mean_by_voltage};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render sweep tables (ion_sweep.csv / hall_sweep.csv) as line charts, heatmaps or scatter plots"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "output/sweep.png")]
    output: PathBuf,
    /// Column to plot (aliases: thrust, isp, power, perveance, efficiency)
    #[arg(long, default_value = "thrust_n")]
    metric: String,
    #[arg(long, value_enum, default_value_t = PlotKind::Line)]
    kind: PlotKind,
    /// Gas shown by the heatmap (defaults to the first gas in the table)
    #[arg(long)]
    gas: Option<String>,
    /// Colour the heatmap by log10 of the metric
    #[arg(long, default_value_t = false)]
    log_color: bool,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum PlotKind {
    /// Metric against voltage per gas, averaged over the second axis
    Line,
    /// Metric over the voltage × current/flow grid for one gas
    Heatmap,
    /// Metric against axial thrust, one point per operating point
    Scatter,
}

#[derive(Debug, Clone)]
struct Row {
    gas: String,
    voltage_v: f64,
    second: f64,
    thrust_n: f64,
    value: f64,
}

impl SweepRecord for Row {
    fn gas(&self) -> &str {
        &self.gas
    }

    fn voltage_v(&self) -> f64 {
        self.voltage_v
    }

    fn second_axis(&self) -> f64 {
        self.second
    }
}

struct Table {
    kind: ThrusterKind,
    metric: String,
    rows: Vec<Row>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let table = read_table(&cli.input, &cli.metric)?;
    if table.rows.is_empty() {
        return Err(anyhow::anyhow!("No finite '{}' values in the provided CSV", table.metric));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    match cli.kind {
        PlotKind::Line => draw_line_chart(&root, &table)?,
        PlotKind::Heatmap => draw_heatmap(&root, &table, cli.gas.as_deref(), cli.log_color, cli.width)?,
        PlotKind::Scatter => draw_scatter(&root, &table)?,
    }

    root.present()?;
    Ok(())
}

fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &Table,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);
    let (scale, axis_label) = metric_display(&table.metric);

    let series: Vec<(String, Vec<(f64, f64)>)> = gases(&table.rows)
        .into_iter()
        .map(|gas| {
            let points = mean_by_voltage(&table.rows, &gas, |r| r.value * scale);
            (gas, points)
        })
        .collect();

    let (x_min, x_max) = span(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let (y_min, y_max) = span(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));
    let y_pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 1e-3).max(1e-12);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            format!("{}: {} vs {}", family_title(table.kind), axis_label, voltage_label(table.kind)),
            caption_font,
        )
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max.max(x_min + 1.0), (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(voltage_label(table.kind))
        .y_desc(axis_label.as_str())
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()?;

    for (idx, (gas, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(gas.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &Table,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);
    let (scale, axis_label) = metric_display(&table.metric);
    let thrust_scale = n_to_mn(1.0);

    let points = |gas: &str| -> Vec<(f64, f64)> {
        table
            .rows
            .iter()
            .filter(|r| r.gas == gas && r.thrust_n.is_finite())
            .map(|r| (r.thrust_n * thrust_scale, r.value * scale))
            .collect()
    };
    let series: Vec<(String, Vec<(f64, f64)>)> = gases(&table.rows)
        .into_iter()
        .map(|gas| {
            let pts = points(&gas);
            (gas, pts)
        })
        .collect();

    let (x_min, x_max) = span(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let (y_min, y_max) = span(series.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));
    if !(x_min.is_finite() && y_min.is_finite()) {
        return Err(anyhow::anyhow!("No finite thrust values in the provided CSV"));
    }
    let x_pad = ((x_max - x_min) * 0.05).max(1e-9);
    let y_pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 1e-3).max(1e-12);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            format!("{}: {} vs Axial Thrust", family_title(table.kind), axis_label),
            caption_font,
        )
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d((x_min - x_pad)..(x_max + x_pad), (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc("Axial Thrust (mN)")
        .y_desc(axis_label.as_str())
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()?;

    for (idx, (gas, pts)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(pts.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))?
            .label(gas.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &Table,
    gas: Option<&str>,
    log_color: bool,
    width: u32,
) -> anyhow::Result<()>
where
    DB::ErrorType: 'static,
{
    let gas = match gas {
        Some(name) => name.to_string(),
        None => gases(&table.rows)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("CSV contains no gas rows"))?,
    };
    let cells: Vec<&Row> = table
        .rows
        .iter()
        .filter(|r| r.gas.eq_ignore_ascii_case(&gas) && r.second > 0.0)
        .collect();
    if cells.is_empty() {
        return Err(anyhow::anyhow!("No rows for gas '{}' in the provided CSV", gas));
    }

    let mut volt_vals: Vec<f64> = cells.iter().map(|r| r.voltage_v).collect();
    let mut second_vals: Vec<f64> = cells.iter().map(|r| r.second).collect();
    volt_vals.sort_by(f64::total_cmp);
    volt_vals.dedup();
    second_vals.sort_by(f64::total_cmp);
    second_vals.dedup();

    let color_value = |v: f64| if log_color { v.log10() } else { v };
    let mut grid = vec![vec![f64::NAN; volt_vals.len()]; second_vals.len()];
    for cell in &cells {
        let (Ok(x_idx), Ok(y_idx)) = (
            volt_vals.binary_search_by(|x| x.total_cmp(&cell.voltage_v)),
            second_vals.binary_search_by(|y| y.total_cmp(&cell.second)),
        ) else {
            continue;
        };
        grid[y_idx][x_idx] = color_value(cell.value);
    }

    let (min_value, mut max_value) = span(grid.iter().flatten().copied());
    if !min_value.is_finite() {
        return Err(anyhow::anyhow!("No finite '{}' values for gas '{}'", table.metric, gas));
    }
    if max_value <= min_value {
        max_value = min_value + min_value.abs().max(1.0) * 1e-3;
    }

    let x_coords = volt_vals.clone();
    let y_coords: Vec<f64> = second_vals.iter().map(|s| s.log10()).collect();
    let (x_lo, _) = cell_bounds(&x_coords, 0);
    let (_, x_hi) = cell_bounds(&x_coords, x_coords.len() - 1);
    let (y_lo, _) = cell_bounds(&y_coords, 0);
    let (_, y_hi) = cell_bounds(&y_coords, y_coords.len() - 1);

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let legend_width = 140i32;
    let (plot_area, legend_area) = root.split_horizontally((width as i32 - legend_width).max(200));
    let kind = table.kind;

    {
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .caption(
                format!("{} ({}): {}", family_title(kind), gas, table.metric),
                caption_font,
            )
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

        chart
            .configure_mesh()
            .x_desc(voltage_label(kind))
            .y_desc(second_axis_label(kind))
            .label_style(label_font.clone())
            .x_labels(6)
            .y_labels(6)
            .y_label_formatter(&|y| format_second_axis(kind, 10f64.powf(*y)))
            .draw()?;

        for (y_idx, row) in grid.iter().enumerate() {
            let (y0, y1) = cell_bounds(&y_coords, y_idx);
            for (x_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let (x0, x1) = cell_bounds(&x_coords, x_idx);
                let t = (value - min_value) / (max_value - min_value);
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x0, y0), (x1, y1)],
                    jet_color(t).filled(),
                )))?;
            }
        }

        let levels: Vec<f64> = (0..12)
            .map(|i| min_value + (i as f64 / 11.0) * (max_value - min_value))
            .collect();
        draw_contours(&mut chart, &grid, &x_coords, &y_coords, &levels, |_| {
            ShapeStyle::from(&BLACK.mix(0.35)).stroke_width(1)
        })?;

        if table.metric.eq_ignore_ascii_case("perveance_margin") {
            let limit = color_value(1.0);
            if (min_value..=max_value).contains(&limit) {
                draw_contours(&mut chart, &grid, &x_coords, &y_coords, &[limit], |_| {
                    ShapeStyle::from(&BLACK).stroke_width(3)
                })?;
                chart.draw_series(std::iter::once(Text::new(
                    "space-charge limit".to_string(),
                    (x_lo + 0.02 * (x_hi - x_lo), y_hi - 0.05 * (y_hi - y_lo)),
                    label_font.clone().color(&BLACK),
                )))?;
            }
        }
    }

    {
        let mut chart = ChartBuilder::on(&legend_area)
            .margin_left(20)
            .margin_right(20)
            .margin_top(30)
            .margin_bottom(30)
            .x_label_area_size(0)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..1.0, min_value..max_value)?;

        for i in 0..300 {
            let t0 = i as f64 / 300.0;
            let t1 = (i + 1) as f64 / 300.0;
            let v0 = min_value + (max_value - min_value) * t0;
            let v1 = min_value + (max_value - min_value) * t1;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, v0), (1.0, v1)],
                jet_color(t0).filled(),
            )))?;
        }

        let legend_desc = if log_color {
            format!("log10({})", table.metric)
        } else {
            table.metric.clone()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_labels(6)
            .y_desc(legend_desc)
            .y_label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .y_label_formatter(&|v| format!("{v:.3}"))
            .draw()?;
    }

    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_table(path: &str, metric_name: &str) -> anyhow::Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let (kind, voltage_idx, second_idx) =
        if let (Some(v), Some(s)) = (column("accel_voltage_v"), column("beam_current_a")) {
            (ThrusterKind::Ion, v, s)
        } else if let (Some(v), Some(s)) = (column("discharge_voltage_v"), column("mass_flow_kg_s"))
        {
            (ThrusterKind::Hall, v, s)
        } else {
            return Err(anyhow::anyhow!(
                "CSV is neither an ion engine nor a Hall thruster sweep table"
            ));
        };
    let gas_idx = column("gas").ok_or_else(|| anyhow::anyhow!("CSV missing 'gas' column"))?;
    let thrust_idx =
        column("thrust_n").ok_or_else(|| anyhow::anyhow!("CSV missing 'thrust_n' column"))?;
    let metric = resolve_metric(&headers, metric_name)
        .ok_or_else(|| anyhow::anyhow!("CSV missing metric column matching '{}'", metric_name))?;

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let field = |idx: usize| -> f64 { r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN) };
        let value = match metric {
            MetricSource::Column(idx) => field(idx),
            MetricSource::Ratio(num, den) => field(num) / field(den),
        };
        let voltage_v = field(voltage_idx);
        let second = field(second_idx);
        let thrust_n = field(thrust_idx);
        if voltage_v.is_finite() && second.is_finite() && value.is_finite() {
            rows.push(Row {
                gas: r.get(gas_idx).unwrap_or("").to_string(),
                voltage_v,
                second,
                thrust_n,
                value,
            });
        }
    }

    let metric = match metric {
        MetricSource::Column(idx) => headers.get(idx).unwrap_or(metric_name).to_string(),
        MetricSource::Ratio(..) => "thrust_efficiency".to_string(),
    };
    Ok(Table { kind, metric, rows })
}

#[derive(Debug, Clone, Copy)]
enum MetricSource {
    Column(usize),
    Ratio(usize, usize),
}

fn resolve_metric(headers: &csv::StringRecord, metric_name: &str) -> Option<MetricSource> {
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    if let Some(idx) = find(metric_name) {
        return Some(MetricSource::Column(idx));
    }
    let metric_lower = metric_name.to_lowercase();
    match metric_lower.as_str() {
        "efficiency" | "thrust_efficiency" => {
            Some(MetricSource::Ratio(find("thrust_n")?, find("ideal_thrust_n")?))
        }
        "thrust" => find("thrust_n").map(MetricSource::Column),
        "isp" => find("isp_s").map(MetricSource::Column),
        "power" => find("power_w").map(MetricSource::Column),
        "perveance" => find("perveance_margin").map(MetricSource::Column),
        _ => None,
    }
}

/// Display scale and axis label for a metric column.
fn metric_display(metric: &str) -> (f64, String) {
    match metric.to_lowercase().as_str() {
        "thrust_n" => (n_to_mn(1.0), "Axial Thrust (mN)".to_string()),
        "ideal_thrust_n" => (n_to_mn(1.0), "Ideal Thrust (mN)".to_string()),
        "isp_s" => (1.0, "Axial Specific Impulse (s)".to_string()),
        "power_w" => (1.0, "Electrical Power (W)".to_string()),
        "perveance_margin" => (1.0, "Perveance Margin (I_CL/I_b)".to_string()),
        "thrust_efficiency" => (1.0, "Thrust Efficiency (T/T_ideal)".to_string()),
        "mass_flow_kg_s" => (kg_s_to_mg_s(1.0), "Mass Flow (mg/s)".to_string()),
        other => (1.0, other.to_string()),
    }
}

fn family_title(kind: ThrusterKind) -> &'static str {
    match kind {
        ThrusterKind::Ion => "Ion Engine",
        ThrusterKind::Hall => "Hall Thruster",
    }
}

fn voltage_label(kind: ThrusterKind) -> &'static str {
    match kind {
        ThrusterKind::Ion => "Acceleration Voltage (V)",
        ThrusterKind::Hall => "Discharge Voltage (V)",
    }
}

fn second_axis_label(kind: ThrusterKind) -> &'static str {
    match kind {
        ThrusterKind::Ion => "Beam Current (A)",
        ThrusterKind::Hall => "Mass Flow (mg/s)",
    }
}

fn format_second_axis(kind: ThrusterKind, value: f64) -> String {
    match kind {
        ThrusterKind::Ion => format!("{value:.2}"),
        ThrusterKind::Hall => format!("{:.2}", kg_s_to_mg_s(value)),
    }
}

fn span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn jet_color(t_in: f64) -> RGBColor {
    let t = t_in.clamp(0.0, 1.0);
    fn comp(v: f64) -> f64 {
        (1.0 - (v - 1.0).abs()).clamp(0.0, 1.0)
    }
    let r = comp(1.5 - 4.0 * (t - 0.75).abs());
    let g = comp(1.5 - 4.0 * (t - 0.5).abs());
    let b = comp(1.5 - 4.0 * (t - 0.25).abs());
    RGBColor((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn draw_contours<DB: DrawingBackend, F: Fn(f64) -> ShapeStyle>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    grid: &[Vec<f64>],
    x_coords: &[f64],
    y_coords: &[f64],
    levels: &[f64],
    style_for: F,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if x_coords.len() < 2 || y_coords.len() < 2 {
        return Ok(());
    }
    for &level in levels {
        let style = style_for(level);
        for i in 0..y_coords.len() - 1 {
            for j in 0..x_coords.len() - 1 {
                let v0 = grid[i][j];
                let v1 = grid[i][j + 1];
                let v2 = grid[i + 1][j + 1];
                let v3 = grid[i + 1][j];
                if !(v0.is_finite() && v1.is_finite() && v2.is_finite() && v3.is_finite()) {
                    continue;
                }
                let coords = [
                    (x_coords[j], y_coords[i]),
                    (x_coords[j + 1], y_coords[i]),
                    (x_coords[j + 1], y_coords[i + 1]),
                    (x_coords[j], y_coords[i + 1]),
                ];
                for (p1, p2) in marching_square_segments([v0, v1, v2, v3], coords, level) {
                    chart.draw_series(std::iter::once(PathElement::new(vec![p1, p2], style)))?;
                }
            }
        }
    }
    Ok(())
}

fn marching_square_segments(
    values: [f64; 4],
    coords: [(f64, f64); 4],
    level: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let mut idx = 0u8;
    for (bit, value) in values.iter().enumerate() {
        if *value >= level {
            idx |= 1 << bit;
        }
    }
    if idx == 0 || idx == 15 {
        return Vec::new();
    }

    let edge_point = |edge: usize| -> (f64, f64) {
        let (a, b) = (edge, (edge + 1) % 4);
        let (va, vb) = (values[a], values[b]);
        let (xa, ya) = coords[a];
        let (xb, yb) = coords[b];
        if (vb - va).abs() < f64::EPSILON {
            return ((xa + xb) * 0.5, (ya + yb) * 0.5);
        }
        let t = (level - va) / (vb - va);
        (xa + t * (xb - xa), ya + t * (yb - ya))
    };

    // Edge e joins corner e and corner (e + 1) % 4.
    let pairs: &[(usize, usize)] = match idx {
        1 | 14 => &[(3, 0)],
        2 | 13 => &[(0, 1)],
        3 | 12 => &[(3, 1)],
        4 | 11 => &[(1, 2)],
        5 => &[(3, 2), (0, 1)],
        6 | 9 => &[(0, 2)],
        7 | 8 => &[(2, 3)],
        10 => &[(3, 0), (1, 2)],
        _ => &[],
    };
    pairs
        .iter()
        .map(|&(e1, e2)| (edge_point(e1), edge_point(e2)))
        .collect()
}

fn cell_bounds(coords: &[f64], idx: usize) -> (f64, f64) {
    let center = coords[idx];
    let prev = idx.checked_sub(1).and_then(|i| coords.get(i)).copied();
    let next = coords.get(idx + 1).copied();

    let left = match (prev, next) {
        (Some(prev), _) => 0.5 * (prev + center),
        (None, Some(next)) => center - 0.5 * (next - center),
        (None, None) => center - 0.5,
    };

    let right = match (prev, next) {
        (_, Some(next)) => 0.5 * (center + next),
        (Some(prev), None) => center + 0.5 * (center - prev),
        (None, None) => center + 0.5,
    };

    (left, right)
}
