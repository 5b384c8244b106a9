/// Click handler injected into the preview page.
///
/// Reports the nearest `.item` (or else `.main`) node's `data-temp_id` to
/// `/api/select`; a click outside any section clears the selection.
pub const PREVIEW_SCRIPT: &str = r#"
document.addEventListener('click', async (event) => {
  const node = event.target.closest('.item') || event.target.closest('.main');
  const id = node ? node.dataset.temp_id : null;
  event.preventDefault();
  await fetch('/api/select', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(id ? { id } : {}),
  });
  window.location.reload();
});
"#;
