use axum::{response::Html, Router, routing::get};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Medical Diagnosis AI Assistant</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 46rem; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input, textarea { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    .notice { padding: 0.75rem; border-radius: 6px; margin-top: 1rem; white-space: pre-wrap; }
    .success { background: #e8f5e9; }
    .warning { background: #fff8e1; }
    .error { background: #fdecea; }
    #output { white-space: pre-wrap; line-height: 1.5; }
  </style>
</head>
<body>
  <h1>Medical Diagnosis Interpreter</h1>
  <p>Upload a <strong>CSV, Excel, or PDF file</strong>, or <strong>paste the test results</strong> below.
  This AI tool will analyze the content and suggest possible diagnoses based on the information.</p>

  <div class="card">
    <label for="fileInput">Upload medical report (CSV, Excel, or PDF)</label>
    <input id="fileInput" type="file" accept=".csv,.xlsx,.xls,.pdf" />
    <label for="textInput">Or paste clinical/lab results manually below:</label>
    <textarea id="textInput" rows="10"></textarea>
    <button id="interpretBtn">Interpret Results</button>
  </div>

  <div id="notices"></div>
  <div class="card" id="resultCard" hidden>
    <h2>Possible Interpretation:</h2>
    <div id="output"></div>
  </div>

  <script>
    const button = document.getElementById('interpretBtn');
    const notices = document.getElementById('notices');
    const resultCard = document.getElementById('resultCard');
    const output = document.getElementById('output');

    function notice(kind, text) {
      const div = document.createElement('div');
      div.className = 'notice ' + kind;
      div.textContent = text;
      notices.appendChild(div);
    }

    button.addEventListener('click', async () => {
      notices.innerHTML = '';
      resultCard.hidden = true;
      output.textContent = '';

      const formData = new FormData();
      const fileInput = document.getElementById('fileInput');
      if (fileInput.files.length) {
        formData.append('file', fileInput.files[0]);
      }
      formData.append('text', document.getElementById('textInput').value);

      button.disabled = true;
      notice('warning', 'Analyzing patient data...');
      try {
        const res = await fetch('/api/interpret', { method: 'POST', body: formData });
        const json = await res.json();
        notices.innerHTML = '';
        (json.extraction_errors || []).forEach(e => notice('error', e));
        if (json.status === 'success') {
          output.textContent = json.interpretation;
          resultCard.hidden = false;
        } else if (json.status === 'warning') {
          notice('warning', json.warning);
        } else {
          notice('error', json.error || 'Request failed');
        }
      } catch (err) {
        notices.innerHTML = '';
        notice('error', 'Request failed: ' + err);
      } finally {
        button.disabled = false;
      }
    });
  </script>
</body>
</html>"#)
}
