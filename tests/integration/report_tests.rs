use chrono::NaiveDate;
use reporter_core::{decode_records, DiagnosticRecord, Formatter, MemoryUsage, RecordFormatter};
use reporter_style::{AnsiStyler, PlainStyler};
use serde_json::json;

fn plain() -> RecordFormatter {
    RecordFormatter::new("/var/www/app", Box::new(PlainStyler))
}

fn decode_one(value: serde_json::Value) -> DiagnosticRecord {
    let mut records = decode_records(&value.to_string()).unwrap();
    assert_eq!(records.len(), 1);
    records.remove(0)
}

fn base() -> serde_json::Value {
    json!({
        "datetime": "2024-03-09 21:15:00",
        "time": 184.2,
        "memory_usage": "6MB",
        "memory_peak_usage": "7.25MB",
    })
}

fn with(mut value: serde_json::Value, key: &str, section: serde_json::Value) -> serde_json::Value {
    value[key] = section;
    value
}

// === Test 1: a record with only the required sections ===
#[test]
fn test_minimal_report_has_seven_lines() {
    let out = plain().format(&decode_one(base()));
    let lines: Vec<&str> = out.split('\n').collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "-".repeat(72));
    assert_eq!(lines[2], "3/9/24 9:15:00 PM");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "TIME:      184.2ms");
    assert_eq!(lines[5], "MEMORY:    6MB (PEAK: 7.25MB)");
    assert_eq!(lines[6], "");
}

// === Test 2: a full web request ===
#[test]
fn test_full_request_report() {
    let mut value = base();
    value["request"] = json!({"method": "PUT", "url": "https://shop.test/cart/12", "ajax": true});
    value["timers"] = json!({"db": {"elapsed": 31}, "templates": {"elapsed": 9.5}});
    value["input"] = json!({"qty": 3, "note": "gift wrap"});
    value["database"] = json!([
        {
            "query": "UPDATE carts SET qty = ?, updated_at = ? WHERE id = ?",
            "bindings": [3, {"datetime": "2024-03-09 21:14:59"}, 12],
            "time": "0.84"
        },
        {"query": "SELECT * FROM items WHERE cart_id = ?", "bindings": [12], "time": 2300}
    ]);
    value["logs"] = json!([
        {"level": "warning", "message": "stock low", "context": {"sku": "A-1", "left": 2}}
    ]);

    let out = plain().format(&decode_one(value));
    let expected = [
        "",
        "------------------------------------------------------------------------",
        "3/9/24 9:15:00 PM",
        "",
        "REQUEST:   https://shop.test/cart/12 (PUT,XHR)",
        "TIME:      184.2ms",
        "TIMERS:    ",
        "  db:        31ms",
        "  templates: 9.5ms",
        "MEMORY:    6MB (PEAK: 7.25MB)",
        "INPUT:     ",
        "  qty:  3",
        "  note: gift wrap",
        "SQL:       2 queries",
        "  (0.84 ms) UPDATE carts SET qty = '3', updated_at = '2024-03-09 21:14:59' WHERE",
        "           id = '12'",
        "  (2.30 s) SELECT * FROM items WHERE cart_id = '12'",
        "",
        "WARNING:   stock low",
        "  {",
        "    \"sku\": \"A-1\",",
        "    \"left\": 2",
        "  }",
        "",
    ];
    assert_eq!(out.split('\n').collect::<Vec<_>>(), expected);
}

// === Test 3: a failing console command ===
#[test]
fn test_command_with_exception() {
    let mut value = base();
    value["command"] = json!("queue:work --once");
    value["exception"] = json!({
        "message": "Connection refused",
        "file": "/var/www/app/vendor/redis/Client.php",
        "line": 88
    });

    let out = plain().format(&decode_one(value));
    assert!(out.contains("\nARTISAN:   queue:work --once\nTIME:"));
    assert!(out.ends_with(
        "\n\nERROR:     Connection refused in vendor/redis/Client.php on line 88\n"
    ));
}

// === Test 4: GET without ajax gets no flags ===
#[test]
fn test_plain_get_has_no_parenthetical() {
    let value = with(base(), "request", json!({"method": "GET", "url": "http://x/y"}));
    let out = plain().format(&decode_one(value));
    assert!(out.contains("\nREQUEST:   http://x/y\n"));
}

// === Test 5: long values wrap under the label column ===
#[test]
fn test_long_url_wraps() {
    let url = format!("http://x/{}", "a".repeat(100));
    let value = with(base(), "request", json!({"method": "GET", "url": url}));
    let out = plain().format(&decode_one(value));
    let first = &url[..69];
    let second = &url[69..];
    assert!(out.contains(&format!("REQUEST:   {first}\n           {second}\n")));
}

// === Test 6: batches are formatted independently and in order ===
#[test]
fn test_batch() {
    let mut second = base();
    second["time"] = json!(1);
    let input = format!("[{}, {}]", base(), second);
    let records = decode_records(&input).unwrap();
    let blocks = plain().format_batch(&records);
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].contains("TIME:      184.2ms"));
    assert!(blocks[1].contains("TIME:      1ms"));
    assert!(!blocks[1].contains("184.2"));
}

// === Test 7: output is a pure function of the record ===
#[test]
fn test_repeatable_apart_from_clock() {
    let record = DiagnosticRecord::new(3.0, MemoryUsage::new("1MB", "1MB"));
    let f = plain();
    let a = f.format(&record);
    let b = f.format(&record);
    let strip = |s: &str| -> Vec<String> {
        s.split('\n')
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, l)| l.to_string())
            .collect()
    };
    assert_eq!(strip(&a), strip(&b));

    let mut stamped = record.clone();
    stamped.logged_at = NaiveDate::from_ymd_opt(2020, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 1);
    assert_eq!(f.format(&stamped), f.format(&stamped));
    assert!(f.format(&stamped).contains("\n12/31/20 12:00:01 AM\n"));
}

// === Test 8: the formatter can be shared between threads ===
#[test]
fn test_concurrent_formatting() {
    let f = std::sync::Arc::new(RecordFormatter::new("/", Box::new(AnsiStyler)));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let f = f.clone();
            std::thread::spawn(move || {
                let record = DiagnosticRecord::new(i as f64, MemoryUsage::new("1MB", "2MB"));
                f.format(&record)
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let out = h.join().unwrap();
        assert!(out.contains(&format!("\x1b[35m{i}ms\x1b[0m")));
        assert_eq!(out.matches("MEMORY:").count(), 1);
    }
}

// === Test 9: partial optional sections are left out, not rejected ===
#[test]
fn test_partial_sections_render() {
    let value = with(base(), "request", json!({"url": "http://x/y"}));
    let value = with(value, "exception", json!({"message": "boom", "line": 3}));
    let out = plain().format(&decode_one(value));

    assert!(!out.contains("REQUEST:"));
    assert!(out.contains("\nERROR:     boom on line 3\n"));

    let value = with(base(), "exception", json!({}));
    assert!(!plain().format(&decode_one(value)).contains("ERROR:"));
}
