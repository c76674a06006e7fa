use once_cell::sync::Lazy;
use reqwest::Client;

// One process-wide client; connection pools are shared across requests
// and per-request timeouts come from configuration at the call site.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

pub fn shared_client() -> &'static Client {
    &HTTP_CLIENT
}
