//! HTTP Service Module
//!
//! 変換エンドポイントのルーティングとオーケストレーション境界を定義する
//! モジュール。リクエストの検証、各コンポーネントの直列実行、エラー種別から
//! HTTPステータスへのマッピングをここで行う。

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{ConvertJob, ConvertResponse, ErrorResponse, RequestParameters};
use crate::error::CsvToXlsxError;
use crate::storage::BlobStore;
use crate::{source, workbook};

/// サービスのルーターを構築する
///
/// エンドポイントは`POST /api/ConvertCsvToExcel`の1つだけです。
pub fn router() -> Router {
    Router::new()
        .route("/api/ConvertCsvToExcel", post(convert_csv_to_excel))
        .layer(TraceLayer::new_for_http())
}

/// 変換エンドポイントのハンドラ
///
/// # 処理フロー
///
/// 1. リクエストボディの検証（ストレージI/Oより前）
/// 2. BlobStoreをリクエストごとに1回構築
/// 3. 列挙 → 組み立て → 発行を直列に実行
/// 4. エラー種別をHTTPステータスにマッピング
async fn convert_csv_to_excel(
    body: Result<Json<RequestParameters>, JsonRejection>,
) -> Response {
    // ボディがJSONとして解釈できない場合も検証エラーとして扱う
    let params = match body {
        Ok(Json(params)) => params,
        Err(rejection) => {
            return error_response(CsvToXlsxError::Validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
        }
    };

    let job = match params.validate() {
        Ok(job) => job,
        Err(err) => return error_response(err),
    };

    info!(excel_filename = %job.excel_filename, "Starting CSV to Excel conversion");

    match run_conversion(&job).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

/// 検証済みリクエストに対して変換パイプラインを実行する
async fn run_conversion(job: &ConvertJob) -> Result<ConvertResponse, CsvToXlsxError> {
    let store = BlobStore::connect(job.connection_string.expose(), &job.container_name)?;
    convert(&store, &job.excel_filename).await
}

/// 列挙 → 組み立て → 発行の変換パイプライン
///
/// ストレージクライアントを外部から受け取るため、テストでは
/// メモリバックエンドを注入できます。
///
/// # エラー
///
/// - `NotFound`: `csvfiles/`配下に`.csv`オブジェクトが1件も存在しない
/// - その他: 各コンポーネントのエラーをそのまま伝播
pub async fn convert(
    store: &BlobStore,
    excel_filename: &str,
) -> Result<ConvertResponse, CsvToXlsxError> {
    let tables = source::fetch_tables(store).await?;

    if tables.is_empty() {
        return Err(CsvToXlsxError::NotFound(
            "No CSV files found in the csvfiles directory of the specified blob container."
                .to_string(),
        ));
    }
    info!(count = tables.len(), "Found CSV files to process");

    let buffer = workbook::assemble(&tables)?;
    let excel_url = store.publish(excel_filename, buffer).await?;

    Ok(ConvertResponse {
        status: "success",
        message: "Job Complete!",
        excel_url,
        file_count: tables.len(),
    })
}

/// エラー種別をHTTPレスポンスにマッピングする
///
/// - `Validation` → 400（プレーンテキスト）
/// - `NotFound` → 404（プレーンテキスト）
/// - その他 → 500（`{"status":"error","message":…}`のJSON）
fn error_response(err: CsvToXlsxError) -> Response {
    match err {
        CsvToXlsxError::Validation(message) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        CsvToXlsxError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        other => {
            error!(error = %other, "Conversion request failed");
            let body = ErrorResponse {
                status: "error",
                message: other.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // エラー種別とHTTPステータスの対応
    #[test]
    fn test_error_response_status_mapping() {
        let validation = error_response(CsvToXlsxError::Validation("missing".to_string()));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let not_found = error_response(CsvToXlsxError::NotFound("none".to_string()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let config = error_response(CsvToXlsxError::Config("bad".to_string()));
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
