//! Scripts evaluated inside the page for operations the engine has no
//! native call for.

pub(crate) const GO_BACK: &str = "history.back();";
pub(crate) const GO_FORWARD: &str = "history.forward();";
pub(crate) const RELOAD: &str = "location.reload();";
pub(crate) const STOP: &str = "window.stop();";
pub(crate) const OUTER_HTML: &str = "document.documentElement.outerHTML";

/// Reports same-document location changes (hash, `pushState`) of the top
/// frame over IPC as `{"location": href}`.
pub(crate) const LOCATION_WATCH: &str = r#"(function () {
  if (window.top !== window) return;
  var report = function () {
    window.ipc.postMessage(JSON.stringify({ location: location.href }));
  };
  ["pushState", "replaceState"].forEach(function (name) {
    var original = history[name];
    history[name] = function () {
      var result = original.apply(this, arguments);
      report();
      return result;
    };
  });
  window.addEventListener("popstate", report);
  window.addEventListener("hashchange", report);
})();"#;

/// `window.find` with the query embedded as a JS string literal.
pub(crate) fn find(text: &str) -> String {
    // A JSON string is a valid JS string literal.
    let literal = serde_json::Value::String(text.to_owned()).to_string();
    format!("window.find({literal});")
}

/// Script results come back JSON-encoded.
pub(crate) fn decode_result(raw: &str) -> Result<String, String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(serde_json::Value::Null) => Err("page has no document".to_string()),
        Ok(other) => Err(format!("unexpected script result: {other}")),
        Err(e) => Err(format!("malformed script result: {e}")),
    }
}

/// The href carried by a `LOCATION_WATCH` message.
pub(crate) fn decode_location(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("location")?
        .as_str()
        .filter(|href| !href.is_empty())
        .map(str::to_owned)
}
