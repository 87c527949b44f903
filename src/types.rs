//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::collections::BTreeMap;

/// セルの値を表す列挙型
///
/// CSVのフィールドから型推論された値を保持します。ワークブックへの
/// 書き込み時に、数値・論理値・文字列のいずれかとして出力されます。
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 文字列
    Text(String),

    /// 空セル
    Empty,
}

impl Cell {
    /// CSVフィールドからセル値を推論する
    ///
    /// 推論の優先順位:
    ///
    /// 1. 空文字列 → `Empty`
    /// 2. f64として解釈可能 → `Number`
    /// 3. 論理値リテラル（`true`/`false`、大文字小文字の変種を含む）→ `Bool`
    /// 4. それ以外 → `Text`
    pub fn parse(field: &str) -> Self {
        if field.is_empty() {
            return Cell::Empty;
        }
        if let Ok(n) = field.parse::<f64>() {
            return Cell::Number(n);
        }
        match field {
            "true" | "True" | "TRUE" => Cell::Bool(true),
            "false" | "False" | "FALSE" => Cell::Bool(false),
            _ => Cell::Text(field.to_string()),
        }
    }

    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// 1つのCSVオブジェクトから解析された表
///
/// ヘッダ行（列名）と、固定アリティのデータ行を保持します。
/// 解析後は不変です。
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// ヘッダ行（列名）
    headers: Vec<String>,

    /// データ行（各行のアリティはヘッダと一致する）
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// ヘッダとデータ行から表を生成
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// ヘッダ行（列名）を取得
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// データ行を取得
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// オブジェクトのベース名から表への決定的な順序付きマッピング
///
/// リクエストごとに1回構築され、ワークブック組み立て後に破棄されます。
/// `BTreeMap`により、シートの出力順序はキーの辞書順で決定的になります。
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: BTreeMap<String, Table>,
}

impl TableSet {
    /// 空のTableSetを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 表を登録する
    ///
    /// 同じキーで複数回登録した場合、後の登録が優先されます。
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// 登録された表の件数
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// 表が1件も登録されていないかを判定
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// (ベース名, 表) のペアをキーの辞書順で列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
}
