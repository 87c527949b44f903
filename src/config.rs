//! Service Configuration Module
//!
//! 環境変数からサービス設定を読み込むモジュール。

use std::net::SocketAddr;

use crate::error::CsvToXlsxError;

/// バインドアドレスを指定する環境変数
const BIND_ENV: &str = "CSV2XLSX_BIND";

/// 既定のバインドアドレス
const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// HTTPサービスの起動設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTPサーバのバインドアドレス
    pub bind_addr: SocketAddr,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `CSV2XLSX_BIND`が未設定の場合は`0.0.0.0:8080`を使用します。
    /// アドレスとして解釈できない値が設定されている場合は`Config`エラーを
    /// 返します。
    pub fn from_env() -> Result<Self, CsvToXlsxError> {
        let raw = std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind_addr = raw.parse().map_err(|_| {
            CsvToXlsxError::Config(format!("Invalid bind address in {}: '{}'", BIND_ENV, raw))
        })?;
        Ok(Self { bind_addr })
    }
}
