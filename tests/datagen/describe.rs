//! Describe command tests.

use super::SCHEMA;
use bench_datagen::datagen::{describe_tables, DescribeArgs};
use std::path::PathBuf;

fn describe_args(tables: &[&str]) -> DescribeArgs {
    DescribeArgs {
        schema: PathBuf::from(SCHEMA),
        tables: tables.iter().map(|t| t.to_string()).collect(),
        seed: None,
    }
}

#[test]
fn test_describe_single_table() {
    let out = describe_tables(&describe_args(&["trades"])).unwrap();
    assert_eq!(
        out,
        "# trades\n\
         row.count=25\n\
         seed=20221130\n\
         name,type,values,distribution\n\
         id,long,[1-25],ascending\n\
         side,string,BUY,ascending\n\
         venue,string,V[1-3],ascending\n"
    );
}

#[test]
fn test_describe_all_tables() {
    let out = describe_tables(&describe_args(&[])).unwrap();
    let headers: Vec<&str> = out.lines().filter(|l| l.starts_with("# ")).collect();
    assert_eq!(headers, vec!["# quotes", "# trades", "# ticks"]);
    assert!(out.contains("seq,long,[1-1000],descending\n"));
    assert!(out.contains("bid,float,[10-20],random\n"));
}

#[test]
fn test_describe_seed_override() {
    let mut args = describe_args(&["ticks"]);
    args.seed = Some(99);
    let out = describe_tables(&args).unwrap();
    assert!(out.contains("row.count=30\nseed=99\n"));
}

#[test]
fn test_describe_unknown_table() {
    let err = describe_tables(&describe_args(&["nope"])).unwrap_err();
    assert!(format!("{err:#}").contains("nope"));
}
