//! Asset pipeline for CSS and JavaScript processing.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Storefront theme */

:root {
  --background: #fafafa;
  --foreground: #171717;
  --muted: #f5f5f5;
  --muted-foreground: #525252;
  --border: #e5e5e5;
  --primary: #047857;
  --primary-foreground: #ffffff;
  --accent: #ecfdf5;
  --radius: 1rem;
  --container: 80rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  scroll-behavior: smooth;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: inherit;
}

h1 {
  font-size: clamp(2.25rem, 5vw, 3rem);
  font-weight: 800;
  letter-spacing: -0.02em;
  line-height: 1.1;
}

h2 {
  font-size: clamp(1.5rem, 3vw, 1.875rem);
  font-weight: 700;
  letter-spacing: -0.01em;
}

h3 {
  font-size: 1.125rem;
  font-weight: 600;
}

.container {
  max-width: var(--container);
  margin: 0 auto;
  padding: 0 1rem;
}

.two-col {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 2.5rem;
  align-items: start;
}

.section {
  padding-top: 4rem;
  padding-bottom: 4rem;
}

.section-white {
  background: #ffffff;
}

.section-muted {
  background: var(--muted);
}

.muted {
  color: var(--muted-foreground);
}

.small,
.fine-print {
  font-size: 0.875rem;
}

.fine-print {
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

.center {
  margin-top: 2rem;
  text-align: center;
}

/* Buttons */
.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  padding: 0.5rem 1rem;
  font: inherit;
  font-size: 0.875rem;
  font-weight: 500;
  text-decoration: none;
  background: var(--primary);
  color: var(--primary-foreground);
  border: 1px solid var(--primary);
  border-radius: 0.75rem;
  cursor: pointer;
}

.btn-outline {
  background: transparent;
  color: var(--foreground);
  border-color: var(--border);
}

.btn-block {
  width: 100%;
}

/* Header */
.site-header {
  position: sticky;
  top: 0;
  z-index: 40;
  background: rgba(255, 255, 255, 0.85);
  backdrop-filter: blur(8px);
  border-bottom: 1px solid var(--border);
}

.header-row {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding-top: 0.75rem;
  padding-bottom: 0.75rem;
}

.brand {
  font-weight: 600;
  text-decoration: none;
}

.nav-links {
  display: flex;
  align-items: center;
  gap: 1.5rem;
}

.nav-links a {
  font-size: 0.875rem;
  font-weight: 500;
  color: var(--muted-foreground);
  text-decoration: none;
}

.nav-links a:hover {
  color: var(--foreground);
}

.menu-btn {
  display: none;
}

.drawer {
  position: fixed;
  top: 0;
  right: 0;
  bottom: 0;
  width: 20rem;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
  background: #ffffff;
  box-shadow: -8px 0 24px rgba(0, 0, 0, 0.1);
}

.drawer[hidden] {
  display: none;
}

.drawer-title {
  font-weight: 600;
  margin-bottom: 1rem;
}

.drawer-link {
  text-decoration: none;
}

/* Hero */
.hero {
  background: linear-gradient(135deg, #ecfdf5, #f7fee7, #fffbeb);
  padding: 5rem 0 7rem;
}

.hero .two-col {
  align-items: center;
}

.accent {
  color: var(--primary);
}

.lead {
  margin-top: 1rem;
  font-size: 1.125rem;
  color: #404040;
}

.actions {
  display: flex;
  flex-wrap: wrap;
  gap: 0.75rem;
  margin: 1.5rem 0 1rem;
}

.hero-image,
.about-image,
.thumb {
  background-size: cover;
  background-position: center;
}

.hero-image {
  aspect-ratio: 1 / 1;
  border-radius: 1.5rem;
  box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25);
}

.about-image {
  min-height: 20rem;
  border-radius: 1.5rem;
}

/* Cards and grids */
.card {
  background: #ffffff;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1.5rem;
}

.grid {
  display: grid;
  grid-template-columns: repeat(3, minmax(0, 1fr));
  gap: 1.5rem;
  margin-top: 2rem;
}

.section-head {
  display: flex;
  align-items: flex-end;
  justify-content: space-between;
}

.filters {
  display: flex;
  gap: 0.5rem;
}

.product,
.tutorial {
  padding: 0 0 1.5rem;
  overflow: hidden;
}

.product h3,
.tutorial h3,
.product-row,
.tutorial .btn {
  margin: 1rem 1.5rem 0;
}

.tutorial .btn {
  width: calc(100% - 3rem);
}

.thumb.square {
  aspect-ratio: 1 / 1;
}

.thumb.video {
  aspect-ratio: 16 / 9;
  position: relative;
}

.duration {
  position: absolute;
  right: 0.5rem;
  bottom: 0.5rem;
  padding: 0.125rem 0.5rem;
  font-size: 0.75rem;
  color: #ffffff;
  background: rgba(0, 0, 0, 0.7);
  border-radius: 0.375rem;
}

.product-row {
  display: flex;
  align-items: center;
  justify-content: space-between;
}

.price {
  font-weight: 600;
}

.tags {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
  margin-top: 0.25rem;
}

.tag {
  font-size: 0.75rem;
  padding: 0.125rem 0.5rem;
  color: var(--muted-foreground);
  background: var(--muted);
  border-radius: 999px;
}

/* Order builder */
.builder-grid {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 1rem;
  margin-top: 1.5rem;
}

.builder-grid label {
  font-size: 0.875rem;
  font-weight: 500;
}

select,
input,
textarea {
  display: block;
  width: 100%;
  margin-top: 0.25rem;
  padding: 0.5rem 0.75rem;
  font: inherit;
  font-size: 0.875rem;
  background: #ffffff;
  border: 1px solid var(--border);
  border-radius: 0.75rem;
}

select:focus,
input:focus,
textarea:focus {
  outline: 2px solid var(--primary);
  outline-offset: 1px;
}

.check {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.check input,
.palette input {
  width: auto;
  margin: 0;
}

.palettes {
  grid-column: span 2;
  border: none;
  display: grid;
  grid-template-columns: repeat(3, minmax(0, 1fr));
  gap: 0.5rem;
}

.palettes legend {
  font-size: 0.875rem;
  font-weight: 500;
  margin-bottom: 0.5rem;
}

.palette {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  padding: 0.5rem 0.75rem;
  border: 1px solid var(--border);
  border-radius: 0.75rem;
  cursor: pointer;
}

.palette:has(input:checked) {
  border-color: var(--primary);
  background: var(--accent);
}

.estimate-title {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 1rem;
}

#estimate {
  font-size: 1.25rem;
}

#estimate.unavailable {
  color: #b91c1c;
  font-size: 1rem;
}

.stack {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
}

.pair {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 0.75rem;
}

.newsletter {
  margin-top: 2.5rem;
}

.inline-form {
  display: flex;
  gap: 0.75rem;
  margin-top: 0.75rem;
}

.inline-form input {
  margin-top: 0;
}

/* About */
.checklist {
  list-style: none;
  margin-top: 1rem;
}

.checklist li::before {
  content: "\2713  ";
  color: var(--primary);
}

.stats {
  display: grid;
  grid-template-columns: repeat(3, minmax(0, 1fr));
  gap: 1.5rem;
  margin-top: 3rem;
}

.stat {
  text-align: center;
}

.stat-number {
  font-size: 1.875rem;
  font-weight: 800;
}

.faq-grid {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 1.5rem;
  margin-top: 1.5rem;
}

.socials {
  display: flex;
  gap: 0.75rem;
}

/* Footer */
.site-footer {
  background: #ffffff;
  border-top: 1px solid var(--border);
}

.footer-grid {
  display: grid;
  grid-template-columns: repeat(4, minmax(0, 1fr));
  gap: 2rem;
  padding-top: 2.5rem;
  padding-bottom: 2.5rem;
}

.footer-grid ul {
  list-style: none;
  margin-top: 0.5rem;
  font-size: 0.875rem;
}

.copyright {
  border-top: 1px solid var(--border);
  padding: 1rem;
  text-align: center;
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

/* Responsive */
@media (max-width: 768px) {
  .two-col,
  .grid,
  .faq-grid,
  .stats,
  .footer-grid {
    grid-template-columns: 1fr;
  }

  .nav-links,
  .filters {
    display: none;
  }

  .menu-btn {
    display: inline-flex;
  }

  .palettes {
    grid-template-columns: repeat(2, minmax(0, 1fr));
  }
}
"#;

const DEFAULT_JS: &str = r#"// Storefront runtime
(function() {
  'use strict';

  // Mobile drawer
  const menuBtn = document.querySelector('.menu-btn');
  const drawer = document.getElementById('drawer');

  if (menuBtn && drawer) {
    const setOpen = (open) => {
      drawer.hidden = !open;
      menuBtn.setAttribute('aria-expanded', String(open));
    };
    menuBtn.addEventListener('click', () => setOpen(drawer.hidden));
    drawer.querySelectorAll('a').forEach(link => {
      link.addEventListener('click', () => setOpen(false));
    });
  }

  document.querySelectorAll('[data-year]').forEach(el => {
    el.textContent = String(new Date().getFullYear());
  });

  // Live estimate
  const dataEl = document.getElementById('pricing-data');
  const form = document.getElementById('quote-form');
  const output = document.getElementById('estimate');
  const hidden = document.getElementById('estimate-value');
  if (!dataEl || !form || !output) return;

  let pricing;
  try {
    pricing = JSON.parse(dataEl.textContent);
  } catch (err) {
    pricing = null;
  }

  const money = new Intl.NumberFormat('en-US', { style: 'currency', currency: 'USD' });
  const controls = () => Array.from(document.querySelectorAll('[form="quote-form"]'));
  const own = (obj, key) => obj != null && Object.prototype.hasOwnProperty.call(obj, key);

  function resolveQuantity(raw) {
    const q = pricing.quantity;
    const text = String(raw == null ? '' : raw).trim();
    if (q.policy === 'reject') {
      if (!/^[+-]?\d+$/.test(text)) return null;
      const n = Number(text);
      return n >= q.min && n <= q.max ? n : null;
    }
    let n = parseInt(text, 10);
    if (Number.isNaN(n)) n = 1;
    return Math.min(q.max, Math.max(q.min, n));
  }

  function estimate() {
    if (!pricing) return null;
    const values = {};
    const addOns = [];
    controls().forEach(el => {
      if (el.type === 'checkbox') {
        if (el.checked) addOns.push(el.value);
      } else if (el.type !== 'radio') {
        values[el.name] = el.value;
      }
    });

    const row = pricing.base[values.category];
    if (!own(row, values.size) || !own(pricing.materials, values.material)) return null;
    if (!addOns.every(a => own(pricing.add_ons, a))) return null;

    const quantity = resolveQuantity(values.quantity);
    if (quantity === null) return null;

    const base = row[values.size];
    const materialAdjusted = base * pricing.materials[values.material];
    const addOnTotal = addOns.reduce((sum, a) => sum + pricing.add_ons[a], 0);
    const perUnit = materialAdjusted + addOnTotal;
    return Math.max(0, perUnit * quantity);
  }

  function render() {
    const amount = estimate();
    if (amount === null || !Number.isFinite(amount)) {
      output.textContent = 'Estimate unavailable';
      output.classList.add('unavailable');
      if (hidden) hidden.value = '';
    } else {
      output.textContent = money.format(amount);
      output.classList.remove('unavailable');
      if (hidden) hidden.value = amount.toFixed(2);
    }
  }

  controls().forEach(el => {
    el.addEventListener('input', render);
    el.addEventListener('change', render);
  });
  render();
})();
"#;
