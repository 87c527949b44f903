//! Workbook Assembler Module
//!
//! `TableSet`を単一のマルチシートXLSXワークブックに組み立てるモジュール。
//! シート名の31文字制限に対する命名ポリシーをここで適用する。

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::CsvToXlsxError;
use crate::types::{Cell, Table, TableSet};

/// XLSXフォーマットのシート名の最大長
const SHEET_NAME_MAX: usize = 31;

/// 超過時の短縮先の最大幅
const SHORTEN_WIDTH: usize = 30;

/// TableSetをワークブックに組み立て、XLSXバイト列を返す
///
/// # 命名アルゴリズム
///
/// 1. キーから拡張子を除いた文字列を候補シート名とする
/// 2. 候補が31文字以内なら、そのままシート名として使用し、
///    表はヘッダ行つき・インデックス列なしで出力する
/// 3. 31文字を超える場合、単語境界を優先した短縮（最大幅30文字、
///    省略記号なし）を行う。幅を超える単語は途中で強制分割され、
///    残り幅を接頭辞で埋める
/// 4. 超過ケースの表はインデックス列つき（0始まりの行番号）で出力する。
///    この非対称性は観測可能な仕様であり、変更してはならない
///
/// 短縮結果の重複排除は行いません。2つの長いキーが同一の短縮名になった
/// 場合、フォーマット層がシートを拒否し、`Serialization`エラーになります。
///
/// # エラー
///
/// - `Serialization`: フォーマット層がシートを拒否した場合
///   （シート名の重複、空のシート名など）
pub fn assemble(tables: &TableSet) -> Result<Vec<u8>, CsvToXlsxError> {
    info!(sheet_count = tables.len(), "Creating Excel workbook");

    let mut workbook = Workbook::new();

    for (key, table) in tables.iter() {
        let candidate = strip_extension(key);

        if candidate.chars().count() <= SHEET_NAME_MAX {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(candidate)?;
            write_table(worksheet, table, false)?;
        } else {
            let shortened = shorten(candidate, SHORTEN_WIDTH);
            info!(
                original = candidate,
                %shortened,
                "Sheet name exceeds 31 characters, shortened"
            );
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&shortened)?;
            write_table(worksheet, table, true)?;
        }
    }

    info!("Job Complete!");
    Ok(workbook.save_to_buffer()?)
}

/// 表を1枚のシートに書き込む
///
/// `with_index`が真の場合、列0に0始まりの行番号を出力し、ヘッダと
/// データ列を1列右にずらします。ヘッダ行のインデックス列は空欄です。
fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    with_index: bool,
) -> Result<(), XlsxError> {
    let offset: u16 = if with_index { 1 } else { 0 };

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string(0, col as u16 + offset, header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        if with_index {
            worksheet.write_number(row_num, 0, row_idx as f64)?;
        }
        for (col, cell) in row.iter().enumerate() {
            let col_num = col as u16 + offset;
            match cell {
                Cell::Number(n) => worksheet.write_number(row_num, col_num, *n)?,
                Cell::Bool(b) => worksheet.write_boolean(row_num, col_num, *b)?,
                Cell::Text(s) => worksheet.write_string(row_num, col_num, s)?,
                Cell::Empty => continue,
            };
        }
    }

    Ok(())
}

/// キーから最後のドット以降の拡張子を除いた候補シート名を返す
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// 単語境界を優先した短縮
///
/// 連続する空白を1つに畳み込み、畳み込んだ全体が`width`以内なら
/// そのまま返します。超える場合、単語を先頭から貪欲に採用し、
/// `width`を超える直前で打ち切ります。
///
/// 収まらない単語が`width`そのものより長い場合に限り、その単語を
/// 途中で強制分割し、残り幅を接頭辞で埋めます。区切りのない長い
/// キー（例: アンダースコア連結のファイル名）は先頭`width`文字に
/// 切り詰められます。
pub(crate) fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let mut result = String::new();
    let mut result_len = 0usize;
    for word in words {
        let word_len = word.chars().count();
        let sep = if result.is_empty() { 0 } else { 1 };

        if result_len + sep + word_len <= width {
            if sep == 1 {
                result.push(' ');
            }
            result.push_str(word);
            result_len += sep + word_len;
            continue;
        }

        // 単語自体が幅を超える場合のみ強制分割し、残り幅を埋める
        if word_len > width {
            let used = result_len + sep;
            if used < width {
                if sep == 1 {
                    result.push(' ');
                }
                result.extend(word.chars().take(width - used));
            }
        }
        break;
    }

    result
}
