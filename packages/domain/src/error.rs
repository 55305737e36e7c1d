//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//! API 層でこのエラーを受け取り、400 Bad Request に変換する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの未入力など。保持するメッセージはそのまま
    /// クライアントに返されるため、内部情報を含めないこと。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

impl DomainError {
    /// クライアントに返すメッセージ
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_messageはプレフィックスなしの本文を返す() {
        let err = DomainError::Validation("Title is required".to_string());

        assert_eq!(err.message(), "Title is required");
        assert_eq!(err.to_string(), "バリデーションエラー: Title is required");
    }
}
