//! Public API Types
//!
//! HTTPエンドポイントのリクエスト・レスポンスボディを定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::error::CsvToXlsxError;

/// ストレージ接続文字列を保持する秘匿ラッパー
///
/// `Debug`出力では値を伏せ字にします。ログやエラーメッセージへの
/// 接続文字列の漏出を防ぐため、生の値は`expose()`経由でのみ取得できます。
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// 生の値を取得する
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

/// 変換リクエストのボディ
///
/// 3つのフィールドはすべて必須ですが、欠落を400エラーとして報告できるよう
/// `Option`として受け取り、`validate()`で検証します。
#[derive(Debug, Deserialize)]
pub struct RequestParameters {
    /// 出力するExcelファイル名（`.xlsx`拡張子は省略可能）
    #[serde(default)]
    pub excel_filename: Option<String>,

    /// Blobコンテナ名
    #[serde(default)]
    pub container_name: Option<String>,

    /// ストレージアカウントの接続文字列
    #[serde(default)]
    pub connection_string: Option<Secret>,
}

impl RequestParameters {
    /// 必須フィールドの存在と非空を検証し、検証済みリクエストを生成する
    ///
    /// いずれかのフィールドが欠落または空の場合、`Validation`エラーを
    /// 返します。この検証はストレージI/Oより前に行われます。
    pub fn validate(self) -> Result<ConvertJob, CsvToXlsxError> {
        let missing = || {
            CsvToXlsxError::Validation(
                "Please provide excel_filename, container_name, and connection_string in the request body."
                    .to_string(),
            )
        };

        let excel_filename = self.excel_filename.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let container_name = self.container_name.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let connection_string = self
            .connection_string
            .filter(|s| !s.expose().is_empty())
            .ok_or_else(missing)?;

        Ok(ConvertJob {
            excel_filename,
            container_name,
            connection_string,
        })
    }
}

/// 検証済みの変換リクエスト
///
/// すべてのフィールドが存在し、非空であることが保証されています。
#[derive(Debug)]
pub struct ConvertJob {
    /// 出力するExcelファイル名
    pub excel_filename: String,

    /// Blobコンテナ名
    pub container_name: String,

    /// ストレージアカウントの接続文字列
    pub connection_string: Secret,
}

/// 変換成功時のレスポンスボディ（200）
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    /// 固定値 `"success"`
    pub status: &'static str,

    /// 固定値 `"Job Complete!"`
    pub message: &'static str,

    /// アップロードされたワークブックのURL（アクセストークンは含まない）
    pub excel_url: String,

    /// 変換されたCSVオブジェクトの件数
    pub file_count: usize,
}

/// 変換失敗時のレスポンスボディ（500）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 固定値 `"error"`
    pub status: &'static str,

    /// 失敗原因のメッセージ本文
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_params() -> RequestParameters {
        RequestParameters {
            excel_filename: Some("report".to_string()),
            container_name: Some("data".to_string()),
            connection_string: Some(Secret::from("AccountName=dev;AccountKey=key")),
        }
    }

    // 完全なリクエストは検証を通過する
    #[test]
    fn test_validate_ok() {
        let job = full_params().validate().expect("valid request");
        assert_eq!(job.excel_filename, "report");
        assert_eq!(job.container_name, "data");
        assert_eq!(job.connection_string.expose(), "AccountName=dev;AccountKey=key");
    }

    // フィールド欠落はValidationエラー
    #[test]
    fn test_validate_missing_field() {
        let mut params = full_params();
        params.connection_string = None;

        match params.validate() {
            Err(CsvToXlsxError::Validation(msg)) => {
                assert!(msg.contains("connection_string"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    // 空文字列は欠落と同様に扱う
    #[test]
    fn test_validate_empty_field() {
        let mut params = full_params();
        params.excel_filename = Some(String::new());

        assert!(matches!(
            params.validate(),
            Err(CsvToXlsxError::Validation(_))
        ));
    }

    // JSONボディからのデシリアライズ（フィールド欠落はNoneになる）
    #[test]
    fn test_deserialize_partial_body() {
        let params: RequestParameters =
            serde_json::from_str(r#"{"excel_filename": "report"}"#).expect("valid json");
        assert_eq!(params.excel_filename.as_deref(), Some("report"));
        assert!(params.container_name.is_none());
        assert!(params.connection_string.is_none());
    }

    // Debug出力に接続文字列が漏れない
    #[test]
    fn test_secret_redacted_in_debug() {
        let secret = Secret::from("AccountName=prod;AccountKey=topsecret");
        let debug = format!("{:?}", secret);
        assert_eq!(debug, "Secret(***)");
        assert!(!debug.contains("topsecret"));
    }
}
