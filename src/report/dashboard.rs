//! Terminal dashboard: KPI card, aggregate tables and anomaly listing

use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    AnomalyReport, CleaningStats, Dataset, FilterOptions, Insights, Kpis, Summary,
};

/// Shown in place of any statistic computed over zero rows.
pub const NO_DATA: &str = "no data";

/// Format an optional statistic with a fixed number of decimals.
pub fn format_stat(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => NO_DATA.to_string(),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{}", v)).unwrap_or_else(|| "-".to_string())
}

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn header(columns: &[&str]) -> Vec<Cell> {
    columns
        .iter()
        .map(|c| Cell::new(c).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header(columns));
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

// ---------------------------------------------------------------------------
// Table builders
// ---------------------------------------------------------------------------

pub fn overview_table(dataset: &Dataset, preview_rows: usize) -> Table {
    let mut table = new_table(&["Date", "Airline", "Origin", "Dest", "ArrDelay", "Distance", "TotalDelay", "OnTime"]);
    for flight in dataset.head(preview_rows) {
        let r = &flight.record;
        table.add_row(vec![
            Cell::new(format_date(r.date)),
            Cell::new(&r.airline),
            Cell::new(&r.origin),
            Cell::new(&r.dest),
            number(r.arr_delay),
            number(format_optional(r.distance)),
            number(flight.total_delay_minutes),
            Cell::new(if flight.on_time { "yes" } else { "no" }),
        ]);
    }
    table
}

/// Missing values per column, only columns that had any.
pub fn missing_table(stats: &CleaningStats) -> Table {
    let mut table = new_table(&["Column", "Missing", "Ratio"]);
    for (column, ratio) in stats.missing_ratios().into_iter().filter(|(_, r)| *r > 0.0) {
        let count = if column == crate::pipeline::schema::DATE {
            stats.absent_dates
        } else {
            stats.absent(&column)
        };
        table.add_row(vec![
            Cell::new(&column),
            number(count),
            number(format!("{:.1}%", ratio * 100.0)),
        ]);
    }
    table
}

pub fn kpi_table(kpis: &Kpis) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("✈️  Total Flights"), number(kpis.flight_count)]);
    table.add_row(vec![
        Cell::new("⏱️  Mean Arrival Delay (min)"),
        number(format_stat(kpis.mean_arr_delay, 2)),
    ]);
    table.add_row(vec![
        Cell::new("✅ On Time"),
        number(match kpis.on_time_pct {
            Some(pct) => format!("{:.2}%", pct),
            None => NO_DATA.to_string(),
        })
        .fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("📏 Mean Distance (mi)"),
        number(format_stat(kpis.mean_distance, 0)),
    ]);
    table.add_row(vec![
        Cell::new("📐 Delay per 100 mi"),
        number(format_stat(kpis.mean_delay_per_100_miles, 2)),
    ]);
    table
}

pub fn airline_table(summary: &Summary) -> Table {
    let mut table = new_table(&["Airline", "Flights", "Mean ArrDelay", "Total Delay (min)"]);
    for (i, row) in summary.by_airline.iter().enumerate() {
        let delay = number(format!("{:.2}", row.mean_arr_delay));
        table.add_row(vec![
            Cell::new(&row.airline),
            number(row.flights),
            if i == 0 { delay.fg(Color::Red) } else { delay },
            number(format!("{:.0}", row.total_delay_minutes)),
        ]);
    }
    table
}

pub fn month_table(summary: &Summary) -> Table {
    let mut table = new_table(&["Month", "Flights", "Mean ArrDelay"]);
    for row in &summary.by_month {
        table.add_row(vec![
            Cell::new(format!("{:>2} {}", row.month, month_name(row.month))),
            number(row.flights),
            number(format!("{:.2}", row.mean_arr_delay)),
        ]);
    }
    table
}

pub fn delay_type_table(summary: &Summary) -> Table {
    let mut table = new_table(&["Delay Type", "Total Minutes", "Share"]);
    for row in &summary.by_delay_type {
        table.add_row(vec![
            Cell::new(&row.label),
            number(format!("{:.0}", row.total_minutes)),
            number(match row.share_pct {
                Some(pct) => format!("{:.1}%", pct),
                None => NO_DATA.to_string(),
            }),
        ]);
    }
    table
}

/// Routes with the highest mean delay.
pub fn route_table(summary: &Summary, top: usize) -> Table {
    let mut table = new_table(&["Origin", "Dest", "Flights", "Mean ArrDelay"]);
    for row in summary.worst_routes(top) {
        table.add_row(vec![
            Cell::new(&row.origin),
            Cell::new(&row.dest),
            number(row.flights),
            number(format!("{:.2}", row.mean_arr_delay)),
        ]);
    }
    table
}

pub fn anomaly_table(report: &AnomalyReport) -> Table {
    let mut table = new_table(&["Date", "Airline", "Origin", "Dest", "ArrDelay"]);
    for row in &report.preview {
        table.add_row(vec![
            Cell::new(format_date(row.date)),
            Cell::new(&row.airline),
            Cell::new(&row.origin),
            Cell::new(&row.dest),
            number(row.arr_delay).fg(Color::Red),
        ]);
    }
    table
}

pub fn options_table(options: &FilterOptions) -> Table {
    let mut table = new_table(&["Filter", "Values"]);
    let dates = match &options.date_bounds {
        Some(b) => format!("{} .. {}", b.start.format("%d-%m-%Y"), b.end.format("%d-%m-%Y")),
        None => NO_DATA.to_string(),
    };
    table.add_row(vec![Cell::new("Dates"), Cell::new(dates)]);
    table.add_row(vec![Cell::new("Airlines"), Cell::new(options.airlines.join(", "))]);
    table.add_row(vec![Cell::new("Origins"), Cell::new(options.origins.join(", "))]);
    table.add_row(vec![Cell::new("Dests"), Cell::new(options.dests.join(", "))]);
    table
}

/// Findings rendered as bullet lines.
pub fn insight_lines(insights: &Insights) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(airline) = &insights.worst_airline {
        lines.push(format!(
            "{} has the highest mean arrival delay: review its operations and maintenance.",
            airline
        ));
    }
    if let Some(month) = insights.peak_month {
        lines.push(format!(
            "{} is the worst month on average: a candidate for schedule and capacity planning.",
            month_name(month)
        ));
    }
    if let Some(kind) = insights.dominant_delay_type {
        lines.push(format!("{} contributes the most delay minutes.", kind));
    }
    lines
}

// ---------------------------------------------------------------------------
// Printing
// ---------------------------------------------------------------------------

/// Print a section title followed by an indented table.
pub fn print_table(title: &str, table: &Table) {
    println!();
    println!("    {}", style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Everything shown for one filtered view.
pub struct Dashboard<'a> {
    pub summary: &'a Summary,
    pub insights: &'a Insights,
    pub anomalies: &'a AnomalyReport,
    pub top_routes: usize,
}

impl Dashboard<'_> {
    pub fn display(&self) {
        if self.summary.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("⚠️").yellow(),
                style("No flights match the selected filters").yellow().bold()
            );
        }

        print_table("KEY PERFORMANCE INDICATORS", &kpi_table(&self.summary.kpis));
        print_table("MEAN DELAY PER AIRLINE", &airline_table(self.summary));
        print_table("MEAN DELAY PER MONTH", &month_table(self.summary));
        print_table("DELAY COMPOSITION", &delay_type_table(self.summary));
        print_table(
            &format!("WORST ROUTES (top {})", self.top_routes),
            &route_table(self.summary, self.top_routes),
        );

        self.display_anomalies();

        let lines = insight_lines(self.insights);
        if !lines.is_empty() {
            println!();
            println!("    {}", style("INSIGHTS").white().bold());
            println!("    {}", style("─".repeat(50)).dim());
            for line in lines {
                println!("      {} {}", style("•").dim(), line);
            }
        }
    }

    fn display_anomalies(&self) {
        println!();
        println!("    {}", style("EXTREME DELAYS (IQR)").white().bold());
        println!("    {}", style("─".repeat(50)).dim());

        match &self.anomalies.threshold {
            Some(t) => println!(
                "      Q1 {:.2} · Q3 {:.2} · IQR {:.2} · upper limit {}",
                t.q1,
                t.q3,
                t.iqr,
                style(format!("{:.2}", t.upper_limit)).yellow()
            ),
            None => println!("      Threshold: {}", NO_DATA),
        }
        println!(
            "      Anomalies found: {}",
            style(self.anomalies.count).yellow().bold()
        );

        if !self.anomalies.preview.is_empty() {
            for line in anomaly_table(self.anomalies).to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}
