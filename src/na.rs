use std::fmt::{self, Display};

/// 欠損値（NA, Not Available）を表現する型
///
/// Rustでは欠損値を型システムで表現するため、OptionではなくNA型を定義します。
/// NAは値が存在しないことを表します。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 値があるかどうかをチェック
    pub fn is_na(&self) -> bool {
        match self {
            NA::Value(_) => false,
            NA::NA => true,
        }
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// 値を取得（存在する場合）、存在しない場合はデフォルト値を返す
    pub fn value_or<'a>(&'a self, default: &'a T) -> &'a T {
        match self {
            NA::Value(v) => v,
            NA::NA => default,
        }
    }

    /// 値を変換する
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }

}

// From実装: Option<T>からNA<T>への変換
impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}
