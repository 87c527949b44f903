//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// csv2xlsxクレート全体で使用するエラー型
///
/// 変換リクエストの検証、BlobストレージへのI/O、CSVの解析、
/// ワークブックのシリアライズ中に発生するすべてのエラーを統一的に扱います。
///
/// # HTTPステータスへのマッピング
///
/// - `Validation`: 400（必須フィールドの欠落・空文字列）
/// - `NotFound`: 404（変換対象のCSVオブジェクトが存在しない）
/// - その他のバリアント: 500（メッセージ本文をそのまま呼び出し元に返す）
#[derive(Error, Debug)]
pub enum CsvToXlsxError {
    /// リクエストパラメータの検証に失敗したエラー
    ///
    /// `excel_filename`、`container_name`、`connection_string`のいずれかが
    /// 欠落または空の場合に発生します。ストレージI/Oより前に検出されます。
    #[error("{0}")]
    Validation(String),

    /// 変換対象のCSVオブジェクトが1件も見つからなかったエラー
    ///
    /// `csvfiles/`プレフィックス配下に`.csv`オブジェクトが存在しない場合に
    /// 発生します。空のワークブックを生成する代わりに、このエラーを返します。
    #[error("{0}")]
    NotFound(String),

    /// Blobストレージへのアクセス中に発生したエラー
    ///
    /// コンテナへの接続失敗、認証エラー、オブジェクトの一覧取得・
    /// ダウンロード・アップロードの失敗などが原因となります。
    ///
    /// `#[from]`属性により、`opendal::Error`から自動的に変換されます。
    #[error("Storage access error: {0}")]
    StorageAccess(#[from] opendal::Error),

    /// CSVオブジェクトの解析中に発生したエラー
    ///
    /// 行ごとのフィールド数の不一致、UTF-8として解釈できないバイト列など、
    /// 不正なCSVが原因となります。1件でも解析に失敗した場合、
    /// リクエスト全体が中断されます（部分的な結果は生成されません）。
    #[error("Failed to parse CSV object: {0}")]
    Parse(#[from] csv::Error),

    /// ワークブックのシリアライズ中に発生したエラー
    ///
    /// シート名の重複や空のシート名など、XLSXフォーマット層が
    /// シートを拒否した場合に発生します。
    #[error("Workbook serialization error: {0}")]
    Serialization(#[from] rust_xlsxwriter::XlsxError),

    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// 接続文字列に`AccountName`や`AccountKey`が含まれていない場合や、
    /// バインドアドレスが不正な場合などに発生します。
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Ioエラーのテスト
    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: CsvToXlsxError = io_err.into();

        match error {
            CsvToXlsxError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    // Parseエラーのテスト（?演算子の動作確認）
    #[test]
    fn test_parse_error_from_csv() {
        fn parse_operation() -> Result<(), CsvToXlsxError> {
            // 行ごとのフィールド数が一致しない不正なCSV
            let data = b"a,b,c\n1,2\n";
            let mut reader = csv::ReaderBuilder::new().from_reader(&data[..]);
            for record in reader.records() {
                let _record = record?;
            }
            Ok(())
        }

        let result = parse_operation();
        match result {
            Err(CsvToXlsxError::Parse(_)) => {}
            _ => panic!("Expected Parse error from ? operator"),
        }
    }

    // Validationエラーのテスト
    #[test]
    fn test_validation_error_display() {
        let error = CsvToXlsxError::Validation(
            "Please provide excel_filename, container_name, and connection_string in the request body.".to_string(),
        );
        assert!(error.to_string().contains("excel_filename"));
    }

    // Serializationエラーのテスト
    #[test]
    fn test_serialization_error_from_xlsx() {
        // 空のシート名はフォーマット層で拒否される
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let result = workbook.add_worksheet().set_name("");
        let xlsx_err = result.err().expect("empty sheet name must be rejected");

        let error: CsvToXlsxError = xlsx_err.into();
        match error {
            CsvToXlsxError::Serialization(_) => {}
            _ => panic!("Expected Serialization error"),
        }
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        // Io
        let io_err: CsvToXlsxError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        // Config
        let config_err = CsvToXlsxError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        // NotFound（メッセージ本文がそのまま表示される）
        let not_found = CsvToXlsxError::NotFound("No CSV files found".to_string());
        assert_eq!(not_found.to_string(), "No CSV files found");
    }
}
