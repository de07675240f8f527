//! Template engine for rendering the storefront page.

use minijinja::{context, Environment};
use serde::Serialize;

use garland_pricing::{
    format_usd, AddOn, Category, Material, PricingConfig, Quote, Selections, Size,
};

use crate::content::SiteContent;

/// One `<option>` in a builder select.
#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One add-on checkbox.
#[derive(Debug, Clone, Serialize)]
pub struct AddOnView {
    pub key: &'static str,
    pub label: &'static str,
    pub price: f64,
    pub checked: bool,
}

/// Initial state of the custom-order builder.
#[derive(Debug, Clone, Serialize)]
pub struct BuilderView {
    pub categories: Vec<OptionView>,
    pub sizes: Vec<OptionView>,
    pub materials: Vec<OptionView>,
    pub add_ons: Vec<AddOnView>,
    pub quantity: u32,
    pub quantity_min: u32,
    pub quantity_max: u32,
    /// Formatted estimate, or the unavailable text.
    pub estimate: String,
    /// Plain two-decimal amount for the hidden form field; empty when unavailable.
    pub estimate_value: String,
}

impl BuilderView {
    pub fn new(selections: &Selections, pricing: &PricingConfig, quote: &Quote) -> Self {
        fn options<T: Copy + PartialEq>(
            all: &[T],
            current: T,
            key: fn(T) -> &'static str,
            label: fn(T) -> &'static str,
        ) -> Vec<OptionView> {
            all.iter()
                .map(|&v| OptionView {
                    key: key(v),
                    label: label(v),
                    selected: v == current,
                })
                .collect()
        }

        Self {
            categories: options(Category::ALL, selections.category, Category::key, Category::label),
            sizes: options(Size::ALL, selections.size, Size::key, Size::label),
            materials: options(Material::ALL, selections.material, Material::key, Material::label),
            add_ons: AddOn::ALL
                .iter()
                .map(|&a| AddOnView {
                    key: a.key(),
                    label: a.label(),
                    price: pricing.table.add_on_price(a),
                    checked: selections.add_ons.contains(a),
                })
                .collect(),
            quantity: selections.quantity,
            quantity_min: pricing.quantity.bounds.min,
            quantity_max: pricing.quantity.bounds.max,
            estimate: quote.to_string(),
            estimate_value: quote
                .price()
                .map(|p| p.decimal())
                .unwrap_or_default(),
        }
    }
}

/// Context for rendering the index page.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Site title
    pub title: String,
    /// Base URL
    pub base_url: String,
    /// Storefront copy
    pub site: SiteContent,
    /// Custom-order builder state
    pub builder: BuilderView,
    /// Pricing JSON embedded for the live estimator
    pub pricing_json: String,
    /// Extra scripts (the dev server injects its reload client here)
    pub scripts: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the storefront templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_filter("currency", format_usd);

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, ctx: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &ctx.title,
            base_url => &ctx.base_url,
            site => &ctx.site,
            brand => &ctx.site.brand,
            builder => &ctx.builder,
            pricing_json => &ctx.pricing_json,
            scripts => &ctx.scripts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("index.html", INDEX_TEMPLATE),
    ("header.html", HEADER_TEMPLATE),
    ("builder.html", BUILDER_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ brand.tagline }}">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  {% include "header.html" %}
  <main>
    {% block content %}{% endblock %}
  </main>
  {% include "footer.html" %}
  <script id="pricing-data" type="application/json">{{ pricing_json | safe }}</script>
  <script src="{{ base_url }}assets/main.js"></script>
  {% for src in scripts %}<script src="{{ src }}"></script>
  {% endfor %}
</body>
</html>"##;

const HEADER_TEMPLATE: &str = r##"<header class="site-header">
  <div class="container header-row">
    <a href="#" class="brand">{{ brand.name }}</a>
    <nav class="nav-links">
      {% for link in site.nav %}<a href="{{ link.href }}">{{ link.label }}</a>
      {% endfor %}<button type="button" class="btn">Shop</button>
    </nav>
    <button type="button" class="btn btn-outline menu-btn" aria-label="Open menu" aria-expanded="false" aria-controls="drawer">Menu</button>
  </div>
  <aside id="drawer" class="drawer" hidden>
    <div class="drawer-title">{{ brand.name }}</div>
    {% for link in site.nav %}<a href="{{ link.href }}" class="drawer-link">{{ link.label }}</a>
    {% endfor %}<button type="button" class="btn">Shop</button>
  </aside>
</header>"##;

const BUILDER_TEMPLATE: &str = r##"<section id="custom" class="section section-white">
  <div class="container two-col">
    <div>
      <h2>Design your custom piece</h2>
      <p class="muted">Get an instant estimate, then submit your request. We'll confirm details within 24 hours.</p>
      <div class="builder-grid" id="order-builder">
        <label>Category
          <select name="category" form="quote-form">
            {% for o in builder.categories %}<option value="{{ o.key }}"{% if o.selected %} selected{% endif %}>{{ o.label }}</option>
            {% endfor %}
          </select>
        </label>
        <label>Size
          <select name="size" form="quote-form">
            {% for o in builder.sizes %}<option value="{{ o.key }}"{% if o.selected %} selected{% endif %}>{{ o.label }}</option>
            {% endfor %}
          </select>
        </label>
        <label>Material
          <select name="material" form="quote-form">
            {% for o in builder.materials %}<option value="{{ o.key }}"{% if o.selected %} selected{% endif %}>{{ o.label }}</option>
            {% endfor %}
          </select>
        </label>
        <label>Quantity
          <input type="number" name="quantity" form="quote-form" min="{{ builder.quantity_min }}" max="{{ builder.quantity_max }}" value="{{ builder.quantity }}">
        </label>
        {% for a in builder.add_ons %}<label class="check">
          <input type="checkbox" name="add_ons" value="{{ a.key }}" form="quote-form"{% if a.checked %} checked{% endif %}>
          {{ a.label }} (+{{ a.price | currency }})
        </label>
        {% endfor %}
        <fieldset class="palettes">
          <legend>Color palette</legend>
          {% for p in site.palettes %}<label class="palette">
            <input type="radio" name="palette" value="{{ p }}" form="quote-form"{% if loop.first %} checked{% endif %}>
            <span>{{ p }}</span>
          </label>
          {% endfor %}
        </fieldset>
      </div>
    </div>

    <div class="card estimate-card">
      <h3 class="estimate-title">Your estimate <output id="estimate" for="order-builder">{{ builder.estimate }}</output></h3>
      <form id="quote-form" class="stack" method="POST" action="{{ site.form_action }}">
        <input aria-label="Full name" name="name" placeholder="Full name" required>
        <input aria-label="Email" name="email" type="email" placeholder="Email" required>
        <input aria-label="Phone" name="phone" placeholder="Phone (optional)">
        <textarea aria-label="Notes" name="notes" rows="5" placeholder="Share inspiration links, dates, delivery notes..."></textarea>
        <input type="hidden" name="estimate" id="estimate-value" value="{{ builder.estimate_value }}">
        <button type="submit" class="btn btn-block">Request quote</button>
        <p class="fine-print">Submitting shares your selections with us. No payment required yet.</p>
      </form>
    </div>
  </div>
</section>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="site-footer">
  <div class="container footer-grid">
    <div>
      <div class="brand">{{ brand.name }}</div>
      <p class="muted">{{ brand.tagline }}.</p>
    </div>
    <div>
      <h4>Shop</h4>
      <ul>
        <li><a href="#shop">Wreaths</a></li>
        <li><a href="#shop">Centerpieces</a></li>
        <li><a href="#shop">Memorial</a></li>
      </ul>
    </div>
    <div>
      <h4>Learn</h4>
      <ul>
        <li><a href="#tutorials">Tutorials</a></li>
        <li><a href="#faq">FAQ</a></li>
        <li><a href="#custom">Custom orders</a></li>
      </ul>
    </div>
    <div>
      <h4>Contact</h4>
      <ul>
        <li>{{ brand.phone }}</li>
        <li><a href="mailto:{{ brand.email }}">{{ brand.email }}</a></li>
      </ul>
    </div>
  </div>
  <div class="copyright">&copy; <span data-year></span> {{ brand.name }}. All rights reserved.</div>
</footer>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="hero">
  <div class="container two-col">
    <div>
      <h1>Welcome to <span class="accent">{{ brand.name }}</span></h1>
      <p class="lead">{{ brand.tagline }}. {{ site.hero.blurb }}</p>
      <div class="actions">
        <a class="btn" href="#shop">Shop featured</a>
        <a class="btn btn-outline" href="#custom">Build your own</a>
      </div>
      <p class="muted small">{{ site.hero.note }}</p>
    </div>
    <div class="hero-image" role="img" aria-label="Photo of a decorative wreath" style="background-image: url('{{ site.hero.image }}')"></div>
  </div>
</section>

<section id="shop" class="section container">
  <div class="section-head">
    <div>
      <h2>Featured designs</h2>
      <p class="muted">Seasonal favorites ready to ship or pick up locally.</p>
    </div>
    <div class="filters">
      <button type="button" class="btn btn-outline">All</button>
      <button type="button" class="btn btn-outline">Wreaths</button>
      <button type="button" class="btn btn-outline">Centerpieces</button>
      <button type="button" class="btn btn-outline">Memorial</button>
    </div>
  </div>
  <div class="grid">
    {% for item in site.products %}
    <article class="card product" id="product-{{ item.id }}">
      <div class="thumb square" style="background-image: url('{{ item.image }}')"></div>
      <h3>{{ item.title }}</h3>
      <div class="product-row">
        <div>
          <div class="price">{{ item.price | currency }}</div>
          <div class="tags">{% for tag in item.tags %}<span class="tag">{{ tag }}</span>{% endfor %}</div>
        </div>
        <button type="button" class="btn">Add</button>
      </div>
    </article>
    {% endfor %}
  </div>
  <div class="center"><a class="btn btn-outline" href="#custom">Start a custom order</a></div>
</section>

{% include "builder.html" %}

<section id="tutorials" class="section section-muted">
  <div class="container">
    <h2>Free tutorials &amp; mildly chaotic maker resources</h2>
    <p class="muted">Learn at your own pace. All videos include captions and seated-position variations for low-energy days.</p>
    <div class="grid">
      {% for v in site.tutorials %}
      <article class="card tutorial" id="tutorial-{{ v.id }}">
        <div class="thumb video" style="background-image: url('{{ v.thumbnail }}')"><span class="duration">{{ v.duration }}</span></div>
        <h3>{{ v.title }}</h3>
        {% if v.url %}<a class="btn btn-outline btn-block" href="{{ v.url }}">Watch</a>{% else %}<button type="button" class="btn btn-outline btn-block">Watch</button>{% endif %}
      </article>
      {% endfor %}
    </div>
    <div class="card newsletter">
      <h3>The Giggle Gazette</h3>
      <p class="muted small">Monthly tips, tool lists, and printable guides, with occasional terrible puns. Unsubscribe anytime.</p>
      <form class="inline-form" method="POST" action="{{ site.form_action }}">
        <input type="email" name="email" placeholder="you@example.com" aria-label="Email" required>
        <button type="submit" class="btn">Subscribe</button>
      </form>
    </div>
  </div>
</section>

<section id="about" class="section container">
  <div class="two-col">
    <div>
      <h2>Our story &amp; shenanigans</h2>
      <p>{{ site.about.story }}</p>
      <ul class="checklist">
        {% for h in site.about.highlights %}<li>{{ h }}</li>
        {% endfor %}
      </ul>
    </div>
    <div class="about-image" style="background-image: url('{{ site.about.image }}')"></div>
  </div>
  <div class="stats">
    {% for s in site.stats %}<div class="card stat"><div class="stat-number">{{ s.number }}</div><div class="muted small">{{ s.label }}</div></div>
    {% endfor %}
  </div>
</section>

<section id="faq" class="section section-muted">
  <div class="container">
    <h2>FAQ</h2>
    <div class="faq-grid">
      {% for f in site.faqs %}
      <div class="card"><h3>{{ f.question }}</h3><p class="muted">{{ f.answer }}</p></div>
      {% endfor %}
    </div>
  </div>
</section>

<section id="contact" class="section container">
  <div class="two-col">
    <div>
      <h2>Get in touch</h2>
      <p>Have a question or a big idea? We're here to help.</p>
      <p>{{ brand.phone }}</p>
      <p><a href="mailto:{{ brand.email }}">{{ brand.email }}</a></p>
      <p class="socials">
        <a href="{{ brand.socials.instagram }}">Instagram</a>
        <a href="{{ brand.socials.facebook }}">Facebook</a>
        <a href="{{ brand.socials.youtube }}">YouTube</a>
      </p>
    </div>
    <div class="card">
      <h3>Send a message</h3>
      <form class="stack" method="POST" action="{{ site.form_action }}">
        <div class="pair">
          <input aria-label="First name" name="first_name" placeholder="First name" required>
          <input aria-label="Last name" name="last_name" placeholder="Last name" required>
        </div>
        <input aria-label="Email" name="email" type="email" placeholder="Email" required>
        <textarea aria-label="How can we help?" name="message" rows="5" placeholder="How can we help?" required></textarea>
        <button type="submit" class="btn btn-block">Send</button>
        <p class="fine-print">We reply within 1 business day.</p>
      </form>
    </div>
  </div>
</section>
{% endblock %}"##;
