use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};
use crate::series::{Column, NASeries};
use crate::DataFrame;

/// CSVファイルからDataFrameを読み込む
///
/// ヘッダー行は必須です。各列は値から型を推論します
/// （Int64 → Float64 → Utf8 の順で試行、空のフィールドはNA）。
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;

    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    // ヘッダー行を取得
    let headers: Vec<String> = rdr
        .headers()
        .map_err(Error::Csv)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // データを列ごとに収集
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result.map_err(Error::Csv)?;
        for (i, values) in raw_columns.iter_mut().enumerate() {
            // 行の長さが足りない場合は空文字列（NA）として扱う
            values.push(record.get(i).unwrap_or("").to_string());
        }
    }

    // 列をDataFrameに追加
    let mut df = DataFrame::new();
    for (header, values) in headers.into_iter().zip(raw_columns) {
        let column = infer_column(&header, values);
        df.add_column(header, column)?;
    }

    Ok(df)
}

/// 文字列値の列から型を推論してColumnを構築する
fn infer_column(name: &str, values: Vec<String>) -> Column {
    let name = Some(name.to_string());
    let non_empty: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();

    // 全てのフィールドが空の列はFloat64のNA列とする
    if non_empty.is_empty() {
        let nas = vec![None; values.len()];
        return Column::Float64(NASeries::from_options(nas, name));
    }

    if non_empty.iter().all(|v| v.parse::<i64>().is_ok()) {
        let parsed = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    None
                } else {
                    v.parse::<i64>().ok()
                }
            })
            .collect();
        return Column::Int64(NASeries::from_options(parsed, name));
    }

    if non_empty.iter().all(|v| v.parse::<f64>().is_ok()) {
        let parsed = values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    None
                } else {
                    v.parse::<f64>().ok()
                }
            })
            .collect();
        return Column::Float64(NASeries::from_options(parsed, name));
    }

    let parsed = values
        .into_iter()
        .map(|v| if v.is_empty() { None } else { Some(v) })
        .collect();
    Column::Utf8(NASeries::from_options(parsed, name))
}

/// DataFrameをCSVファイルに書き込む
///
/// NAは空のフィールドとして書き込まれます。
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut wtr = Writer::from_writer(file);

    // ヘッダー行を書き込む
    wtr.write_record(df.column_names()).map_err(Error::Csv)?;

    // 各行のデータを書き込む
    for i in 0..df.row_count() {
        let mut row = Vec::with_capacity(df.column_count());
        for col_name in df.column_names() {
            let column = df.column(col_name)?;
            row.push(column.value_to_string(i));
        }
        wtr.write_record(&row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}
