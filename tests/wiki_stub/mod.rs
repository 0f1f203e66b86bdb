use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head><title>List of episodes</title></head>
  <body>
    <h1 id="firstHeading">List of episodes</h1>
    <table class="wikitable">
      <tr><td>1</td><td><b><a href="/wiki/The_Boy_in_the_Iceberg">The Boy in the Iceberg</a></b></td></tr>
      <tr><td>2</td><td><b>Untitled</b></td></tr>
      <tr><td>3</td><td><a href="/wiki/Unbolded">Unbolded</a></td></tr>
      <tr><td>4</td><td><b><a href="/wiki/The_Avatar_Returns">The Avatar Returns</a></b></td></tr>
    </table>
  </body>
</html>
"#;

pub const ICEBERG_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Transcript</title></head>
  <body>
    <h1 id="firstHeading">Transcript:The Boy in the Iceberg</h1>
    <table class="wikitable">
      <tbody>
        <tr><th>Katara:</th><td></td><td>Hello [waves] there</td></tr>
        <tr><td colspan="2">The scene shifts to the Southern Water Tribe.</td></tr>
        <tr><th>Sokka:</th><td></td><td>Aang&#8205; is here.</td></tr>
      </tbody>
    </table>
  </body>
</html>
"#;

pub const RETURNS_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Transcript</title></head>
  <body>
    <h1 id="firstHeading">Transcript:The Avatar Returns (episode)</h1>
    <p>This transcript has not been written yet.</p>
  </body>
</html>
"#;

pub struct WikiStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl WikiStub {
    pub fn spawn() -> Self {
        let pages = HashMap::from([
            ("/wiki/List_of_episodes", INDEX_HTML),
            ("/wiki/Transcript:The_Boy_in_the_Iceberg", ICEBERG_HTML),
            ("/wiki/Transcript:The_Avatar_Returns", RETURNS_HTML),
        ]);

        let server = tiny_http::Server::http("127.0.0.1:0").expect("start wiki stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let response = match pages.get(url.as_str()) {
                    Some(body) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/html; charset=utf-8"[..],
                        )
                        .expect("build header");
                        tiny_http::Response::from_string(*body).with_header(header)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn index_url(&self) -> String {
        format!("{}/wiki/List_of_episodes", self.base_url)
    }

    pub fn transcript_base_url(&self) -> String {
        format!("{}/wiki/Transcript:", self.base_url)
    }
}

impl Drop for WikiStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
