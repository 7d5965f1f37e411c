use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// 成功响应结构，读路径会原样缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub response_code: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            response_code: StatusCode::OK.as_u16(),
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            response_code: StatusCode::CREATED.as_u16(),
            data,
        }
    }
}

/// 单条记录或记录列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload<E> {
    Many(Vec<E>),
    One(E),
}

impl<E> Payload<E> {
    pub fn len(&self) -> usize {
        match self {
            Payload::Many(records) => records.len(),
            Payload::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 读接口返回并缓存的响应
pub type Envelope<E> = ApiResponse<Payload<E>>;
