//! Storage Module
//!
//! Blobストレージへのアクセスを抽象化するモジュール。
//! リクエストごとに1つの`BlobStore`を構築し、列挙側（Source Enumerator）と
//! 発行側（Sink Publisher）の両方に同じクライアントを渡す。

mod connection;

use opendal::{services, Operator};
use tracing::info;

use crate::error::CsvToXlsxError;

pub(crate) use connection::ConnectionString;

/// アップロード時に付与する拡張子
const XLSX_EXTENSION: &str = ".xlsx";

/// リクエストスコープのBlobストレージクライアント
///
/// 1つのコンテナに束縛されたクライアントです。接続文字列から構築するか、
/// テスト用に任意の`Operator`（例: メモリバックエンド）を注入できます。
#[derive(Debug, Clone)]
pub struct BlobStore {
    op: Operator,
    base_url: String,
}

impl BlobStore {
    /// 接続文字列とコンテナ名からクライアントを構築する
    ///
    /// ここではネットワークI/Oは発生しません。認証情報が不正な場合、
    /// 最初の操作（一覧取得など）で`StorageAccess`エラーになります。
    pub fn connect(connection_string: &str, container: &str) -> Result<Self, CsvToXlsxError> {
        let conn = ConnectionString::parse(connection_string)?;
        info!(container, "Connecting to blob container");

        let builder = services::Azblob::default()
            .container(container)
            .endpoint(&conn.endpoint)
            .account_name(&conn.account_name)
            .account_key(&conn.account_key);
        let op = Operator::new(builder)?.finish();

        let base_url = format!("{}/{}", conn.endpoint, container);
        Ok(Self { op, base_url })
    }

    /// 任意の`Operator`からクライアントを構築する
    ///
    /// テストではメモリバックエンド（`services::Memory`）を注入します。
    /// `base_url`は発行後のオブジェクトURLの構築に使用されます。
    pub fn with_operator(op: Operator, base_url: impl Into<String>) -> Self {
        Self {
            op,
            base_url: base_url.into(),
        }
    }

    /// 指定プレフィックス配下のオブジェクトキーを再帰的に列挙する
    ///
    /// プレフィックスで始まるキーをすべて返します。ネストした仮想
    /// ディレクトリ配下のオブジェクトも対象です。
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, CsvToXlsxError> {
        let entries = self.op.list_with(prefix).recursive(true).await?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.metadata().mode().is_file())
            .map(|entry| entry.path().to_string())
            .collect())
    }

    /// オブジェクトの全内容を取得する
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, CsvToXlsxError> {
        let buffer = self.op.read(path).await?;
        Ok(buffer.to_vec())
    }

    /// ワークブックをコンテナのルートにアップロードし、そのURLを返す
    ///
    /// - `name`が`.xlsx`で終わっていない場合、拡張子を付与する
    ///   （既に付いている場合は二重付与しない）
    /// - 既存オブジェクトは上書きされる（last-write-wins）
    /// - 返されるURLにアクセストークンは含まれない
    pub async fn publish(&self, name: &str, data: Vec<u8>) -> Result<String, CsvToXlsxError> {
        let blob_name = if name.ends_with(XLSX_EXTENSION) {
            name.to_string()
        } else {
            format!("{}{}", name, XLSX_EXTENSION)
        };

        info!(%blob_name, "Uploading Excel workbook to blob container");
        self.op.write(&blob_name, data).await?;

        Ok(format!("{}/{}", self.base_url, blob_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// テスト用のメモリバックエンドを構築
    fn memory_store() -> BlobStore {
        let op = Operator::new(services::Memory::default())
            .expect("memory operator")
            .finish();
        BlobStore::with_operator(op, "http://storage.example/test")
    }

    // 拡張子がない場合は付与される
    #[tokio::test]
    async fn test_publish_appends_extension() {
        let store = memory_store();
        let url = store
            .publish("report", b"data".to_vec())
            .await
            .expect("publish");
        assert_eq!(url, "http://storage.example/test/report.xlsx");
    }

    // 拡張子が既にある場合は二重付与しない
    #[tokio::test]
    async fn test_publish_no_double_extension() {
        let store = memory_store();
        let url = store
            .publish("report.xlsx", b"data".to_vec())
            .await
            .expect("publish");
        assert_eq!(url, "http://storage.example/test/report.xlsx");
    }

    // 上書きセマンティクス（last-write-wins）
    #[tokio::test]
    async fn test_publish_overwrites() {
        let store = memory_store();
        store.publish("report", b"first".to_vec()).await.expect("publish");
        store.publish("report", b"second".to_vec()).await.expect("publish");

        let data = store.read("report.xlsx").await.expect("read back");
        assert_eq!(data, b"second");
    }

    // プレフィックス列挙
    #[tokio::test]
    async fn test_list_prefix() {
        let store = memory_store();
        store.op.write("csvfiles/a.csv", b"x".to_vec()).await.expect("write");
        store.op.write("csvfiles/b.csv", b"y".to_vec()).await.expect("write");
        store.op.write("other/c.csv", b"z".to_vec()).await.expect("write");

        let mut paths = store.list("csvfiles/").await.expect("list");
        paths.sort();
        assert_eq!(paths, vec!["csvfiles/a.csv", "csvfiles/b.csv"]);
    }

    // ネストした仮想ディレクトリ配下のオブジェクトも列挙される
    #[tokio::test]
    async fn test_list_includes_nested_keys() {
        let store = memory_store();
        store.op.write("csvfiles/a.csv", b"x".to_vec()).await.expect("write");
        store
            .op
            .write("csvfiles/2024/nested.csv", b"y".to_vec())
            .await
            .expect("write");

        let mut paths = store.list("csvfiles/").await.expect("list");
        paths.sort();
        assert_eq!(paths, vec!["csvfiles/2024/nested.csv", "csvfiles/a.csv"]);
    }
}
