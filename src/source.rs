//! Source Enumerator Module
//!
//! コンテナ内の`csvfiles/`プレフィックス配下からCSVオブジェクトを列挙・取得し、
//! `TableSet`に解析するモジュール。

use tracing::info;

use crate::error::CsvToXlsxError;
use crate::storage::BlobStore;
use crate::types::{Cell, Table, TableSet};

/// CSVオブジェクトを探索する固定プレフィックス
pub const CSV_PREFIX: &str = "csvfiles/";

/// `csvfiles/`配下のすべてのCSVオブジェクトを取得し、TableSetを構築する
///
/// # 処理フロー
///
/// 1. `csvfiles/`プレフィックス配下のオブジェクトを列挙
/// 2. キーが`.csv`で終わるものだけを対象とする
/// 3. 各オブジェクトの全内容を取得し、CSVとして解析
/// 4. パスプレフィックスを除いたベース名をキーとして登録
///
/// 読み取り専用の操作であり、ストレージへの変更は行いません。
///
/// # エラー
///
/// - `StorageAccess`: コンテナに到達できない、認証情報が不正
/// - `Parse`: 取得したオブジェクトが有効なCSVでない（1件の失敗で
///   リクエスト全体が中断される）
///
/// 対象オブジェクトが0件の場合はエラーにならず、空のTableSetを返します。
/// 「入力なし」の扱いは呼び出し元（オーケストレーション境界）が決定します。
pub async fn fetch_tables(store: &BlobStore) -> Result<TableSet, CsvToXlsxError> {
    let mut tables = TableSet::new();

    for path in store.list(CSV_PREFIX).await? {
        if !path.ends_with(".csv") {
            continue;
        }
        info!(%path, "Found CSV file");

        let data = store.read(&path).await?;
        let table = parse_csv(&data)?;
        tables.insert(base_name(&path), table);
    }

    info!(count = tables.len(), "Total CSV files found in csvfiles directory");
    Ok(tables)
}

/// CSVバイト列を表に解析する
///
/// カンマ区切り・先頭行をヘッダとして解釈します。データ行のアリティが
/// ヘッダと一致しない場合や、UTF-8として解釈できない場合は`Parse`エラーに
/// なります。
pub(crate) fn parse_csv(data: &[u8]) -> Result<Table, CsvToXlsxError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Ok(Table::new(headers, rows))
}

/// オブジェクトキーからパスプレフィックスを除いたベース名を返す
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
