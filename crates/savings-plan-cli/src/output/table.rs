use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use savings_plan_core::format::format_amount;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                if let Some(Value::Object(report)) = result.get("report") {
                    print_report(report);
                } else if let Some(Value::Array(by_year)) = result.get("by_year") {
                    print_comparison(result, by_year);
                } else if let Some(Value::Array(lines)) = result.get("lines") {
                    print_lines(lines);
                } else {
                    print_flat_object(result);
                }
                print_envelope_notes(map);
            }
            _ => print_flat_object(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

/// Summary panel, one row per year, then the first-year walkthrough.
fn print_report(report: &Map<String, Value>) {
    if let Some(Value::Object(summary)) = report.get("summary") {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (label, key) in [
            ("Final balance", "final_balance"),
            ("Total contributed", "total_contribution"),
            ("Total profit", "total_profit"),
        ] {
            builder.push_record([label.to_string(), cell(summary.get(key))]);
        }
        println!("{}", Table::from(builder));
    }

    match report.get("rows") {
        Some(Value::Array(rows)) if !rows.is_empty() => {
            let columns = [
                "year",
                "cumulative_contribution",
                "cumulative_periodic_only",
                "cumulative_profit",
                "balance",
            ];
            let mut builder = Builder::default();
            builder.push_record(["Year", "Contributed", "Contributions only", "Profit", "Balance"]);
            for row in rows {
                builder.push_record(columns.iter().map(|c| cell(row.get(*c))));
            }
            println!("\n{}", Table::from(builder));
        }
        _ => println!("\n(no years projected)"),
    }

    if let Some(Value::Array(lines)) = report.get("trace") {
        if !lines.is_empty() {
            println!();
            print_lines(lines);
        }
    }
}

fn print_comparison(result: &Map<String, Value>, by_year: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Monthly", "Annual", "Difference"]);
    for row in by_year {
        builder.push_record([
            cell(row.get("year")),
            amount_cell(row.get("monthly_balance")),
            amount_cell(row.get("annual_balance")),
            amount_cell(row.get("difference")),
        ]);
    }
    println!("{}", Table::from(builder));

    println!(
        "\nFinal balance difference (monthly - annual): {}",
        amount_cell(result.get("final_balance_difference"))
    );
    println!(
        "Profit difference (monthly - annual): {}",
        amount_cell(result.get("profit_difference"))
    );
}

fn print_lines(lines: &[Value]) {
    for line in lines {
        if let Value::String(s) = line {
            println!("{}", s);
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for item in arr {
            if let Value::Object(map) = item {
                builder.push_record(headers.iter().map(|h| cell(map.get(h.as_str()))));
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

/// Decimal fields arrive as strings; render them as display amounts.
fn amount_cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => Decimal::from_str(s)
            .map(format_amount)
            .unwrap_or_else(|_| s.clone()),
        other => cell(other),
    }
}

fn cell(value: Option<&Value>) -> String {
    value.map(format_value).unwrap_or_default()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
