//! 用户可见的文本。

use media_resolver::{MediaType, ResolveResult};
use relay_core::RelayError;

pub const MSG_START: &str = "你好！我是你的电报机器人。请发送视频或图片链接，我会帮你解析。";
pub const MSG_RESOLVING: &str = "正在解析中...";
pub const MSG_INVALID_LINK: &str = "请发送有效的链接。";
pub const MSG_RESOLVE_FAILED: &str = "解析失败或没有可发送的媒体链接。";

/// Placeholder text after a successful resolve.
pub fn resolved(result: &ResolveResult) -> String {
    format!(
        "解析成功！\n标题：{} {}",
        result.title_or_default(),
        result.description_or_default()
    )
}

/// Manual-download notice for media over the size limit.
pub fn too_large(media_type: &MediaType, url: &str) -> String {
    match media_type {
        MediaType::Video => format!("视频文件过大，无法发送。请手动下载：{}", url),
        _ => format!("图片文件过大，无法发送。请手动下载：{}", url),
    }
}

/// Manual-download notice when the size could not be probed and unknown sizes are blocked.
pub fn size_unknown(url: &str) -> String {
    format!("无法获取文件大小，请手动下载：{}", url)
}

pub fn unrecognized(media_type: &MediaType) -> String {
    format!("无法识别的媒体类型: {}", media_type)
}

pub fn send_failed(error: &RelayError) -> String {
    format!("发送失败: {}", error.detail())
}

pub fn group_send_failed(error: &RelayError) -> String {
    format!("发送图片组失败: {}", error.detail())
}

/// Catch-all placeholder text; shows the bare error message, not the variant name.
pub fn unexpected(error: &RelayError) -> String {
    format!("出现错误: {}", error.detail())
}
