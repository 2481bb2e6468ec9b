// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 验证环境变量能够覆盖默认配置

#[cfg(test)]
mod tests {
    use domainrs::config::settings::Settings;
    use std::path::Path;

    #[test]
    fn test_environment_overrides_defaults() {
        std::env::set_var("DOMAINRS__SERVER__PORT", "9100");
        std::env::set_var("DOMAINRS__STORAGE__CSV_PATH", "/tmp/domains_override.csv");
        std::env::set_var("DOMAINRS__LISTING__SESSION_COOKIE", "sid=42");

        let settings = match Settings::new() {
            Ok(settings) => settings,
            Err(e) => panic!("✗ Failed to load configuration: {}", e),
        };

        std::env::remove_var("DOMAINRS__SERVER__PORT");
        std::env::remove_var("DOMAINRS__STORAGE__CSV_PATH");
        std::env::remove_var("DOMAINRS__LISTING__SESSION_COOKIE");

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.storage.csv_path, Path::new("/tmp/domains_override.csv"));
        assert_eq!(settings.listing.session_cookie.as_deref(), Some("sid=42"));
        // 未覆盖的项保持默认值
        assert_eq!(settings.harvest.delay_ms, 1000);
    }
}
