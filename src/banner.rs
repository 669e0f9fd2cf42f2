//! Startup banner.

use std::net::SocketAddr;

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub addr: SocketAddr,
    pub store: &'a str,
    pub model: Option<&'a str>,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             T O D O - A I             ║
   ║    a todo list that takes requests    ║
   ╚═══════════════════════════════════════╝

   version   {}
   listen    http://{}
   store     {}
   model     {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.addr,
        info.store,
        info.model.unwrap_or("disabled (no GEMINI_API_KEY)"),
    )
}

/// Print the startup banner with server info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_listen_address_and_store() {
        let text = render_banner(&BannerInfo {
            addr: "127.0.0.1:3000".parse().unwrap(),
            store: "sqlite (todos.db)",
            model: Some("gemini-2.0-flash"),
        });
        assert!(text.contains("http://127.0.0.1:3000"));
        assert!(text.contains("sqlite (todos.db)"));
        assert!(text.contains("gemini-2.0-flash"));
    }

    #[test]
    fn banner_flags_missing_model() {
        let text = render_banner(&BannerInfo {
            addr: "0.0.0.0:3000".parse().unwrap(),
            store: "sqlite (ephemeral)",
            model: None,
        });
        assert!(text.contains("disabled"));
    }
}
