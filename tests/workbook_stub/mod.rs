use std::sync::mpsc;
use std::thread;
use std::time::Duration;

// Week of 2024-05-13: published under the predicted id.
const PREDICTED_PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <article id="article">
      <header><h1>13-19 de maio</h1></header>
      <p>PROVÉRBIOS 30</p>
      <h3>Cântico 89 e oração</h3>
      <h2>TESOUROS DA PALAVRA DE DEUS</h2>
      <h3>1. Duas coisas que Jeová quer que você peça (10 min)</h3>
      <p>Pro. 30:8, 9.</p>
      <h3>2. Joias espirituais (10 min)</h3>
      <p>Pro. 30:24-28 — O que esses animais nos ensinam sobre sabedoria?</p>
      <h3>3. Leitura da Bíblia (4 min)</h3>
      <p>Pro. 30:1-14 (<a href="/pt/wol/d/r5/lp-t/1102023204">th lição 2</a>)</p>
      <h2>FAÇA SEU MELHOR NO MINISTÉRIO</h2>
      <h3>4. Iniciando conversas (3 min)</h3>
      <p>DE CASA EM CASA. (<a href="/pt/wol/d/r5/lp-t/202022882">th lição 1</a>)</p>
      <h3>5. Cultivando o interesse (4 min)</h3>
      <p>TESTEMUNHO INFORMAL.</p>
      <h3>6. Discurso (5 min)</h3>
      <p>ijwbq artigo 103 — Tema: O que a Bíblia diz sobre a ansiedade?</p>
      <h2>NOSSA VIDA CRISTÃ</h2>
      <h3>Cântico 120</h3>
      <h3>7. Necessidades locais (15 min)</h3>
      <p>Anúncios e cartas.</p>
      <h3>8. Estudo bíblico de congregação (30 min)</h3>
      <p><a href="https://wol.jw.org/pt/wol/d/r5/lp-t/1102021201">lfb</a> histórias 16-17</p>
      <h3>Comentários finais (3 min) | Cântico 136 e oração</h3>
    </article>
  </body>
</html>
"#;

// Week of 2024-05-20: the predicted id answers 404 and the schedule index
// advertises a different id for the workbook.
const INDEX_WITH_LINK: &str = r#"<!doctype html>
<html>
  <body>
    <h1>Programação de reuniões</h1>
    <ul>
      <li><a href="/pt/wol/d/r5/lp-t/202400212">A Sentinela (Estudo)</a></li>
      <li><a href="/pt/wol/d/r5/lp-t/202124021">Apostila da reunião Vida e Ministério Cristão</a></li>
    </ul>
  </body>
</html>
"#;

const DISCOVERED_PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <h2>TESOUROS DA PALAVRA DE DEUS</h2>
    <h3>1. O que aprendemos com Agur (10 min)</h3>
    <p>Pro. 30:1-6.</p>
    <h2>NOSSA VIDA CRISTÃ</h2>
    <h3>Estudo bíblico de congregação (30 min)</h3>
    <p>lfb histórias 18-19. Conclua com cântico e oração.</p>
  </body>
</html>
"#;

// Week of 2024-06-03: the index points at an id that itself answers 404.
const INDEX_WITH_DEAD_LINK: &str = r#"<!doctype html>
<html>
  <body>
    <a href="/pt/wol/d/r5/lp-t/202124023">Apostila da reunião Vida e Ministério Cristão</a>
  </body>
</html>
"#;

// Week of 2024-06-24: a well-formed index without any workbook link.
const INDEX_WITHOUT_LINK: &str = r#"<!doctype html>
<html>
  <body>
    <a href="/pt/wol/d/r5/lp-t/202400262">A Sentinela (Estudo)</a>
  </body>
</html>
"#;

/// In-process stand-in for the online library. Serves a fixed set of week
/// pages and schedule indexes so every resolution path is reachable:
/// predicted hit (2024-05-13), index fallback (2024-05-20), not found
/// anywhere (2024-05-27), dead index link (2024-06-03), server error
/// (2024-06-10), blank page (2024-06-17), index without a workbook link
/// (2024-06-24).
pub struct LibraryStub {
    pub base_url: String,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LibraryStub {
    pub fn spawn() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start library stub server");
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
                let path = url.split(['?', '#']).next().unwrap_or(&url);

                let (status, body) = match path {
                    "/pt/wol/d/r5/lp-t/202024020" => (200, PREDICTED_PAGE),
                    "/pt/wol/meetings/r5/lp-t/2024/21" => (200, INDEX_WITH_LINK),
                    "/pt/wol/d/r5/lp-t/202124021" => (200, DISCOVERED_PAGE),
                    "/pt/wol/meetings/r5/lp-t/2024/23" => (200, INDEX_WITH_DEAD_LINK),
                    "/pt/wol/d/r5/lp-t/202024024" => (500, "internal error"),
                    "/pt/wol/d/r5/lp-t/202024025" => (200, "  \n  "),
                    "/pt/wol/meetings/r5/lp-t/2024/26" => (200, INDEX_WITHOUT_LINK),
                    _ => (404, "not found"),
                };

                let mut response = tiny_http::Response::from_string(body).with_status_code(status);
                if status == 200 {
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"text/html; charset=utf-8"[..],
                    )
                    .expect("build header");
                    response = response.with_header(header);
                }

                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for LibraryStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
