#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub site_dir: String,
    pub data_file: String,
    pub geoip_path: String,
    /// IPs whose page loads are never recorded (the operator's own machines).
    pub excluded_ips: Vec<String>,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("SITEPULSE_PORT")
                .unwrap_or_else(|_| "3002".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            site_dir: std::env::var("SITEPULSE_SITE_DIR")
                .unwrap_or_else(|_| "./site".to_string()),
            data_file: std::env::var("SITEPULSE_DATA_FILE")
                .unwrap_or_else(|_| "./analytics.json".to_string()),
            geoip_path: std::env::var("SITEPULSE_GEOIP_PATH")
                .unwrap_or_else(|_| "./GeoLite2-City.mmdb".to_string()),
            excluded_ips: std::env::var("SITEPULSE_EXCLUDED_IPS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            cors_origins: std::env::var("SITEPULSE_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    pub fn is_excluded_ip(&self, ip: &str) -> bool {
        self.excluded_ips.iter().any(|e| e == ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_ip_exact_match_only() {
        let cfg = Config {
            port: 0,
            site_dir: String::new(),
            data_file: String::new(),
            geoip_path: String::new(),
            excluded_ips: vec!["38.49.72.41".to_string()],
            cors_origins: vec![],
        };
        assert!(cfg.is_excluded_ip("38.49.72.41"));
        assert!(!cfg.is_excluded_ip("38.49.72.4"));
        assert!(!cfg.is_excluded_ip(""));
    }
}
