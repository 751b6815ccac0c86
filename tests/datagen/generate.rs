//! Generate command tests.

use super::{generate_args, read_lines};
use bench_datagen::datagen::run_generate;
use tempfile::TempDir;

#[tokio::test]
async fn test_generate_all_tables() {
    tracing_subscriber::fmt()
        .with_env_filter("bench_datagen=info,bench_populate_csv=info")
        .try_init()
        .ok();

    let temp_dir = TempDir::new().unwrap();
    let report = run_generate(generate_args(temp_dir.path())).await.unwrap();

    assert_eq!(report.seed, 20221130);
    let names: Vec<&str> = report.tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(names, vec!["quotes", "trades", "ticks"]);

    // Explicit, fixed and default row counts
    let counts: Vec<u64> = report.tables.iter().map(|t| t.rows_written).collect();
    assert_eq!(counts, vec![40, 25, 30]);

    for table in &report.tables {
        assert!(!table.skipped);
        assert!(table.path.exists());
        assert_eq!(
            std::fs::metadata(&table.path).unwrap().len(),
            table.file_size_bytes
        );
        let def = table.path.with_extension("csv.def");
        assert!(def.exists(), "missing {def:?}");
    }
}

#[tokio::test]
async fn test_generated_quotes_columns() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = generate_args(temp_dir.path());
    args.tables = vec!["quotes".to_string()];
    run_generate(args).await.unwrap();

    let lines = read_lines(&temp_dir.path().join("quotes.csv"));
    assert_eq!(lines.len(), 41);
    assert_eq!(lines[0], "sym,price,size,ts");

    let rows: Vec<Vec<&str>> = lines[1..].iter().map(|l| l.split(',').collect()).collect();

    // Ascending symbols cycle through all 8 values
    let syms: Vec<&str> = rows.iter().take(9).map(|r| r[0]).collect();
    assert_eq!(
        syms,
        vec!["SYM1", "SYM2", "SYM3", "SYM4", "SYM5", "SYM6", "SYM7", "SYM8", "SYM1"]
    );

    // Random prices stay in range
    for row in &rows {
        let price: f64 = row[1].parse().unwrap();
        assert!((100.0..=200.0).contains(&price), "price {price}");
    }

    // Run-length sizes come in blocks of 4
    assert_eq!(rows[0][2], "100");
    assert_eq!(rows[3][2], "100");
    assert_eq!(rows[4][2], "200");
    assert_eq!(rows[39][2], "1000");

    // Linear conversion maps the row axis onto the timestamp range
    assert_eq!(rows[0][3], "1669766400000");
    assert_eq!(rows[39][3], "1669766400039");
}

#[tokio::test]
async fn test_generated_fixed_table() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = generate_args(temp_dir.path());
    args.tables = vec!["trades".to_string()];
    args.no_header = true;
    run_generate(args).await.unwrap();

    let lines = read_lines(&temp_dir.path().join("trades.csv"));
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "1,BUY,V1");
    assert_eq!(lines[1], "2,BUY,V2");
    assert_eq!(lines[3], "4,BUY,V1");
    assert_eq!(lines[24], "25,BUY,V1");
}

#[tokio::test]
async fn test_generate_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    run_generate(generate_args(first.path())).await.unwrap();
    run_generate(generate_args(second.path())).await.unwrap();

    for table in ["quotes", "trades", "ticks"] {
        let file = format!("{table}.csv");
        assert_eq!(
            read_lines(&first.path().join(&file)),
            read_lines(&second.path().join(&file)),
            "{table} differs between runs"
        );
    }
}

#[tokio::test]
async fn test_seed_override_changes_random_columns() {
    let base = TempDir::new().unwrap();
    let reseeded = TempDir::new().unwrap();

    let mut args = generate_args(base.path());
    args.tables = vec!["ticks".to_string()];
    run_generate(args).await.unwrap();

    let mut args = generate_args(reseeded.path());
    args.tables = vec!["ticks".to_string()];
    args.seed = Some(7);
    let report = run_generate(args).await.unwrap();
    assert_eq!(report.seed, 7);

    let a = read_lines(&base.path().join("ticks.csv"));
    let b = read_lines(&reseeded.path().join("ticks.csv"));

    // Descending sequence ignores the seed, random bids don't
    let seq = |lines: &[String]| -> Vec<String> {
        lines[1..]
            .iter()
            .map(|l| l.split(',').next().unwrap().to_string())
            .collect()
    };
    assert_eq!(seq(&a), seq(&b));
    assert_eq!(seq(&a)[0], "-1");
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_second_run_skips_up_to_date_tables() {
    let temp_dir = TempDir::new().unwrap();

    run_generate(generate_args(temp_dir.path())).await.unwrap();
    let report = run_generate(generate_args(temp_dir.path())).await.unwrap();
    assert!(report.tables.iter().all(|t| t.skipped));
    assert!(report.tables.iter().all(|t| t.rows_written == 0));

    let mut args = generate_args(temp_dir.path());
    args.force = true;
    let report = run_generate(args).await.unwrap();
    assert!(report.tables.iter().all(|t| !t.skipped));
}

#[tokio::test]
async fn test_scale_factor_regenerates() {
    let temp_dir = TempDir::new().unwrap();
    run_generate(generate_args(temp_dir.path())).await.unwrap();

    let mut args = generate_args(temp_dir.path());
    args.tables = vec!["quotes".to_string()];
    args.scale_factor = Some(2.0);
    let report = run_generate(args).await.unwrap();

    let quotes = &report.tables[0];
    assert!(!quotes.skipped);
    assert_eq!(quotes.row_count, 80);
    assert_eq!(quotes.rows_written, 80);

    // Run-length blocks double in size, cardinality is unchanged
    let lines = read_lines(&temp_dir.path().join("quotes.csv"));
    let sizes: Vec<&str> = lines[1..].iter().map(|l| l.split(',').nth(2).unwrap()).collect();
    assert_eq!(sizes[7], "100");
    assert_eq!(sizes[8], "200");
    assert_eq!(sizes[79], "1000");
}

#[tokio::test]
async fn test_row_count_override() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = generate_args(temp_dir.path());
    args.row_count = Some(5);
    let report = run_generate(args).await.unwrap();
    assert!(report.tables.iter().all(|t| t.rows_written == 5));
}

#[tokio::test]
async fn test_unknown_table_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let mut args = generate_args(&output_dir);
    args.tables = vec!["quotes".to_string(), "missing".to_string()];

    let err = run_generate(args).await.unwrap_err();
    assert!(format!("{err:#}").contains("missing"));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_invalid_scale_factor() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = generate_args(temp_dir.path());
    args.scale_factor = Some(0.0);
    let err = run_generate(args).await.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid scale factor"));
}
