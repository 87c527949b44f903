//! Connection String Module
//!
//! Azure Storageの接続文字列を解析するモジュール。
//! `Key=Value`ペアのセミコロン区切り形式を解析し、Blobエンドポイントと
//! 認証情報を導出する。

use crate::error::CsvToXlsxError;

/// Azuriteローカルエミュレータの既知のアカウント名
const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";

/// Azuriteローカルエミュレータの既知のアカウントキー（公開された固定値）
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

/// 解析済みの接続文字列
///
/// Blobサービスのエンドポイントと認証情報を保持します。エンドポイントは
/// アップロード後のBlob URLの構築にも使用されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionString {
    /// Blobサービスのエンドポイント（末尾スラッシュなし）
    pub endpoint: String,

    /// ストレージアカウント名
    pub account_name: String,

    /// ストレージアカウントキー
    pub account_key: String,
}

impl ConnectionString {
    /// 接続文字列を解析する
    ///
    /// # 解析ルール
    ///
    /// - `UseDevelopmentStorage=true` → Azuriteの既知アカウントと
    ///   `http://127.0.0.1:10000/devstoreaccount1`エンドポイント
    /// - `AccountName`と`AccountKey`は必須（上記の開発用指定を除く）
    /// - `BlobEndpoint`が指定されていればそれを優先
    /// - 未指定の場合、`{DefaultEndpointsProtocol}://{AccountName}.blob.{EndpointSuffix}`
    ///   を構築（プロトコル既定値は`https`、サフィックス既定値は`core.windows.net`）
    pub fn parse(raw: &str) -> Result<Self, CsvToXlsxError> {
        let mut protocol = "https";
        let mut account_name: Option<&str> = None;
        let mut account_key: Option<&str> = None;
        let mut endpoint_suffix = "core.windows.net";
        let mut blob_endpoint: Option<&str> = None;
        let mut use_development_storage = false;

        for segment in raw.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            // セグメント本体は鍵素材を含み得るため、エラーには載せない
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                CsvToXlsxError::Config(
                    "Connection string contains a segment without '='".to_string(),
                )
            })?;

            match key {
                "DefaultEndpointsProtocol" => protocol = value,
                "AccountName" => account_name = Some(value),
                "AccountKey" => account_key = Some(value),
                "EndpointSuffix" => endpoint_suffix = value,
                "BlobEndpoint" => blob_endpoint = Some(value),
                "UseDevelopmentStorage" => use_development_storage = value == "true",
                // 未知のキー（QueueEndpointなど）は無視する
                _ => {}
            }
        }

        if use_development_storage {
            return Ok(Self {
                endpoint: format!("http://127.0.0.1:10000/{}", DEV_ACCOUNT_NAME),
                account_name: DEV_ACCOUNT_NAME.to_string(),
                account_key: DEV_ACCOUNT_KEY.to_string(),
            });
        }

        let account_name = account_name.ok_or_else(|| {
            CsvToXlsxError::Config("Connection string is missing AccountName".to_string())
        })?;
        let account_key = account_key.ok_or_else(|| {
            CsvToXlsxError::Config("Connection string is missing AccountKey".to_string())
        })?;

        let endpoint = match blob_endpoint {
            Some(e) => e.trim_end_matches('/').to_string(),
            None => format!("{}://{}.blob.{}", protocol, account_name, endpoint_suffix),
        };

        Ok(Self {
            endpoint,
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
        })
    }
}
