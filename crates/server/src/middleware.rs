use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};
use tracing::info;

/// 请求日志中间件
///
/// 记录客户端IP、方法、路径、状态码和耗时。
/// 测试中通过 `oneshot` 调用时没有连接信息，IP 记为 unknown。
pub async fn request_logger(connect_info: Option<ConnectInfo<SocketAddr>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let start = Instant::now();

    info!("📍 API请求 - IP: {} | {} {}", client_ip, method, path);

    let response = next.run(request).await;

    info!(
        "✅ 请求完成 - IP: {} | {} {} | 状态: {} | 耗时: {:.2}ms",
        client_ip,
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    response
}
