//! CSV入出力のテスト

use std::io::Write;

use predrs::error::Error;
use predrs::io::{read_csv, write_csv};
use predrs::series::ColumnType;

#[test]
fn test_read_csv_infers_types() -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "id,price,name")?;
    writeln!(file, "1,19.9,apple")?;
    writeln!(file, "2,35.0,banana")?;
    writeln!(file, "3,42.5,cherry")?;

    let df = read_csv(file.path())?;

    assert_eq!(df.row_count(), 3);
    assert_eq!(df.column_names(), vec!["id", "price", "name"]);
    assert_eq!(df.column("id")?.column_type(), ColumnType::Int64);
    assert_eq!(df.column("price")?.column_type(), ColumnType::Float64);
    assert_eq!(df.column("name")?.column_type(), ColumnType::Utf8);
    assert_eq!(df.column("price")?.to_vec_f64()?, vec![19.9, 35.0, 42.5]);
    Ok(())
}

#[test]
fn test_read_csv_empty_fields_become_na() -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "weight,title")?;
    writeln!(file, "10,good")?;
    writeln!(file, ",")?;
    writeln!(file, "30,bad")?;

    let df = read_csv(file.path())?;

    // 空のフィールドはNAになり、型推論は非空の値で行われる
    assert_eq!(df.column("weight")?.column_type(), ColumnType::Int64);
    assert_eq!(df.column("weight")?.null_count(), 1);
    assert_eq!(df.column("title")?.null_count(), 1);
    Ok(())
}

#[test]
fn test_read_missing_file_is_error() {
    let result = read_csv("/nonexistent/path/data.csv");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_write_and_read_back() -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "score,comment")?;
    writeln!(file, "5,good")?;
    writeln!(file, "3,")?;
    writeln!(file, "1,bad")?;

    let df = read_csv(file.path())?;

    let out = tempfile::NamedTempFile::new()?;
    write_csv(&df, out.path())?;
    let reread = read_csv(out.path())?;

    assert_eq!(reread.row_count(), 3);
    assert_eq!(reread.column("score")?.to_vec_f64()?, vec![5.0, 3.0, 1.0]);
    // NAは空のフィールドとして往復する
    assert_eq!(reread.column("comment")?.null_count(), 1);
    Ok(())
}
