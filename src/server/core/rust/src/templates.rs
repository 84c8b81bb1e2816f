/* src/server/core/rust/src/templates.rs */

//! Built-in section templates, one per component kind.
//! A file `{templates_dir}/{CanonicalName}.html` replaces the built-in.

use pagewright_engine::ComponentKind;

const HEADER: &str = concat!(
  "<header class=\"pw-header\">",
  "<!--pw:if:title--><h2><!--pw:title--></h2><!--pw:endif:title-->",
  "<!--pw:if:subtitle--><p class=\"pw-subtitle\"><!--pw:subtitle--></p><!--pw:endif:subtitle-->",
  "<!--pw:if:description--><p class=\"pw-description\"><!--pw:description--></p><!--pw:endif:description-->",
  "</header>",
);

const CARD: &str = concat!(
  "<article class=\"pw-card\">",
  "<!--pw:if:$.iconHtml--><span class=\"pw-icon\"><!--pw:$.iconHtml:html--></span><!--pw:endif:$.iconHtml-->",
  "<!--pw:if:$.image--><!--pw:$.image:attr:src--><img alt=\"\" loading=\"lazy\"><!--pw:endif:$.image-->",
  "<h3><!--pw:$.title--></h3>",
  "<!--pw:if:$.description--><p><!--pw:$.description--></p><!--pw:endif:$.description-->",
  "<!--pw:if:$.solution--><p class=\"pw-solution\"><!--pw:$.solution--></p><!--pw:endif:$.solution-->",
  "<!--pw:if:$.features--><ul><!--pw:each:$.features--><li><!--pw:$--></li><!--pw:endeach--></ul><!--pw:endif:$.features-->",
  "</article>",
);

/// A CTA button at `path`. A null link opens the contact modal instead.
fn button(path: &str) -> String {
  format!(
    concat!(
      "<!--pw:if:{p}.link-->",
      "<!--pw:{p}.link:attr:href--><!--pw:{p}.variant:attr:data-variant--><a class=\"pw-btn\"><!--pw:{p}.text--></a>",
      "<!--pw:else-->",
      "<!--pw:{p}.variant:attr:data-variant--><button class=\"pw-btn\" type=\"button\" data-action=\"contact\"><!--pw:{p}.text--></button>",
      "<!--pw:endif:{p}.link-->",
    ),
    p = path
  )
}

fn cards(class: &str, list: &str) -> String {
  format!(
    "<div class=\"pw-{class}\">{HEADER}<div class=\"pw-grid\"><!--pw:each:{list}-->{CARD}<!--pw:endeach--></div></div>"
  )
}

fn hero() -> String {
  format!(
    concat!(
      "<!--pw:backgroundImage:attr:data-bg--><div class=\"pw-hero\">",
      "<h1><!--pw:title--></h1>",
      "<!--pw:if:subtitle--><p class=\"pw-subtitle\"><!--pw:subtitle--></p><!--pw:endif:subtitle-->",
      "<!--pw:if:description--><p class=\"pw-description\"><!--pw:description--></p><!--pw:endif:description-->",
      "<div class=\"pw-actions\">{primary}<!--pw:if:secondaryButton-->{secondary}<!--pw:endif:secondaryButton--></div>",
      "</div>",
    ),
    primary = button("ctaButton"),
    secondary = button("secondaryButton"),
  )
}

fn cta() -> String {
  format!("<div class=\"pw-cta\">{HEADER}<div class=\"pw-actions\">{}</div></div>", button("ctaButton"))
}

fn about() -> String {
  format!(
    concat!(
      "<div class=\"pw-about\">{header}",
      "<!--pw:if:image--><!--pw:image:attr:src--><img alt=\"\"><!--pw:endif:image-->",
      "<!--pw:if:mission--><p class=\"pw-mission\"><!--pw:mission--></p><!--pw:endif:mission-->",
      "<!--pw:if:vision--><p class=\"pw-vision\"><!--pw:vision--></p><!--pw:endif:vision-->",
      "<!--pw:if:highlights--><ul><!--pw:each:highlights--><li><!--pw:$--></li><!--pw:endeach--></ul><!--pw:endif:highlights-->",
      "</div>",
    ),
    header = HEADER
  )
}

fn faq() -> String {
  concat!(
    "<div class=\"pw-faq\"><header class=\"pw-header\"><h2><!--pw:faqData.title--></h2>",
    "<!--pw:if:faqData.description--><p class=\"pw-description\"><!--pw:faqData.description--></p><!--pw:endif:faqData.description-->",
    "</header><!--pw:each:faqData.items--><details><summary><!--pw:$.question--></summary>",
    "<p><!--pw:$.answer--></p></details><!--pw:endeach--></div>",
  )
  .to_string()
}

fn testimonials() -> String {
  format!(
    concat!(
      "<div class=\"pw-testimonials\">{header}<!--pw:each:testimonials--><blockquote>",
      "<p><!--pw:$.quote--></p><footer><!--pw:$.author-->",
      "<!--pw:if:$.role-->, <!--pw:$.role--><!--pw:endif:$.role-->",
      "<!--pw:if:$.company--> (<!--pw:$.company-->)<!--pw:endif:$.company--></footer>",
      "</blockquote><!--pw:endeach--></div>",
    ),
    header = HEADER
  )
}

fn stats() -> String {
  format!(
    concat!(
      "<div class=\"pw-stats\">{header}<dl><!--pw:each:stats-->",
      "<div><dt><!--pw:$.prefix--><!--pw:$.value--><!--pw:$.suffix--></dt><dd><!--pw:$.label--></dd></div>",
      "<!--pw:endeach--></dl></div>",
    ),
    header = HEADER
  )
}

fn contact() -> String {
  format!(
    concat!(
      "<div class=\"pw-contact\">{header}<ul>",
      "<!--pw:if:email--><li><!--pw:email--></li><!--pw:endif:email-->",
      "<!--pw:if:phone--><li><!--pw:phone--></li><!--pw:endif:phone-->",
      "<!--pw:if:address--><li><!--pw:address--></li><!--pw:endif:address-->",
      "<!--pw:if:hours--><li><!--pw:hours--></li><!--pw:endif:hours-->",
      "</ul>{button}</div>",
    ),
    header = HEADER,
    button = button("ctaButton")
  )
}

fn steps() -> String {
  format!(
    concat!(
      "<div class=\"pw-steps\">{header}<ol><!--pw:each:steps-->",
      "<li><span class=\"pw-step\"><!--pw:$.step--></span><h3><!--pw:$.title--></h3>",
      "<!--pw:if:$.description--><p><!--pw:$.description--></p><!--pw:endif:$.description--></li>",
      "<!--pw:endeach--></ol></div>",
    ),
    header = HEADER
  )
}

fn case_studies() -> String {
  format!(
    concat!(
      "<div class=\"pw-case-studies\">{header}<!--pw:each:items--><article class=\"pw-card\">",
      "<h3><!--pw:$.title--></h3><!--pw:if:$.client--><p class=\"pw-client\"><!--pw:$.client--></p><!--pw:endif:$.client-->",
      "<!--pw:if:$.challenge--><p><!--pw:$.challenge--></p><!--pw:endif:$.challenge-->",
      "<!--pw:if:$.solution--><p><!--pw:$.solution--></p><!--pw:endif:$.solution-->",
      "<!--pw:if:$.results--><ul><!--pw:each:$.results--><li><!--pw:$--></li><!--pw:endeach--></ul><!--pw:endif:$.results-->",
      "</article><!--pw:endeach--></div>",
    ),
    header = HEADER
  )
}

fn team() -> String {
  format!(
    concat!(
      "<div class=\"pw-team\">{header}<!--pw:each:members--><figure>",
      "<!--pw:if:$.image--><!--pw:$.image:attr:src--><img alt=\"\"><!--pw:endif:$.image-->",
      "<figcaption><strong><!--pw:$.name--></strong> <!--pw:$.role--></figcaption>",
      "</figure><!--pw:endeach--></div>",
    ),
    header = HEADER
  )
}

fn milestones() -> String {
  format!(
    concat!(
      "<div class=\"pw-milestones\">{header}<ol><!--pw:each:milestones-->",
      "<li><time><!--pw:$.year--></time> <strong><!--pw:$.title--></strong> <!--pw:$.description--></li>",
      "<!--pw:endeach--></ol></div>",
    ),
    header = HEADER
  )
}

fn video() -> String {
  format!(
    concat!(
      "<div class=\"pw-video\">{header}<!--pw:if:video-->",
      "<!--pw:video:attr:src--><!--pw:poster:attr:poster--><!--pw:autoplay:attr:autoplay--><!--pw:autoplay:attr:muted-->",
      "<video controls playsinline></video><!--pw:endif:video--></div>",
    ),
    header = HEADER
  )
}

fn slider() -> String {
  format!(
    concat!(
      "<!--pw:interval:attr:data-interval--><!--pw:autoplay:attr:data-autoplay--><div class=\"pw-slider\">",
      "<!--pw:each:slides--><div class=\"pw-slide\">",
      "<!--pw:if:$.image--><!--pw:$.image:attr:src--><img alt=\"\"><!--pw:endif:$.image-->",
      "<h2><!--pw:$.title--></h2><!--pw:if:$.description--><p><!--pw:$.description--></p><!--pw:endif:$.description-->",
      "{button}</div><!--pw:endeach--></div>",
    ),
    button = button("$.ctaButton")
  )
}

fn training_programs() -> String {
  concat!(
    "<div class=\"pw-programs\"><header class=\"pw-header\"><h2><!--pw:programsSection.title--></h2>",
    "<!--pw:if:programsSection.description--><p class=\"pw-description\"><!--pw:programsSection.description--></p><!--pw:endif:programsSection.description-->",
    "</header><!--pw:if:trainingPrograms.title--><h3><!--pw:trainingPrograms.title--></h3><!--pw:endif:trainingPrograms.title-->",
    "<!--pw:each:trainingPrograms.programs--><article class=\"pw-card\" data-action=\"program\"><h3><!--pw:$.title--></h3>",
    "<p><!--pw:$.description--></p><!--pw:if:$.duration--><span class=\"pw-duration\"><!--pw:$.duration--></span><!--pw:endif:$.duration-->",
    "<!--pw:if:$.topics--><ul><!--pw:each:$.topics--><li><!--pw:$--></li><!--pw:endeach--></ul><!--pw:endif:$.topics-->",
    "</article><!--pw:endeach--></div>",
  )
  .to_string()
}

fn modules() -> String {
  format!(
    concat!(
      "<div class=\"pw-modules\">{header}<!--pw:each:modules--><article class=\"pw-card\"><h3><!--pw:$.title--></h3>",
      "<p><!--pw:$.description--></p><!--pw:if:$.topics--><ul><!--pw:each:$.topics--><li><!--pw:$--></li><!--pw:endeach--></ul><!--pw:endif:$.topics-->",
      "</article><!--pw:endeach--></div>",
    ),
    header = HEADER
  )
}

fn plans() -> String {
  format!(
    concat!(
      "<div class=\"pw-plans\">{header}<!--pw:each:plans--><!--pw:$.highlighted:attr:data-highlighted--><article class=\"pw-plan\">",
      "<h3><!--pw:$.name--></h3><!--pw:if:$.price--><p class=\"pw-price\"><!--pw:$.price--><!--pw:if:$.period--> / <!--pw:$.period--><!--pw:endif:$.period--></p><!--pw:endif:$.price-->",
      "<ul><!--pw:each:$.features--><li><!--pw:$--></li><!--pw:endeach--></ul>{button}",
      "</article><!--pw:endeach--></div>",
    ),
    header = HEADER,
    button = button("$.ctaButton")
  )
}

/// Built-in template for `kind`; `None` for unknown kinds.
pub fn builtin(kind: &ComponentKind) -> Option<String> {
  let html = match kind {
    ComponentKind::Hero | ComponentKind::PayrollHero | ComponentKind::ManufacturingHero => hero(),
    ComponentKind::Cta => cta(),
    ComponentKind::About => about(),
    ComponentKind::Features => cards("features", "features"),
    ComponentKind::Faq | ComponentKind::PayrollFaq => faq(),
    ComponentKind::Testimonials => testimonials(),
    ComponentKind::Stats => stats(),
    ComponentKind::Contact => contact(),
    ComponentKind::Services => cards("services", "services"),
    ComponentKind::Process | ComponentKind::PayrollWorkflow => steps(),
    ComponentKind::Benefits => cards("benefits", "benefits"),
    ComponentKind::PainPoints
    | ComponentKind::PayrollPainPoints
    | ComponentKind::ManufacturingPainPoints => cards("pain-points", "painPoints"),
    ComponentKind::UseCases => cards("use-cases", "useCases"),
    ComponentKind::Industries => cards("industries", "industries"),
    ComponentKind::CaseStudies | ComponentKind::ManufacturingCaseStudies => case_studies(),
    ComponentKind::Team => team(),
    ComponentKind::Milestones => milestones(),
    ComponentKind::Values => cards("values", "values"),
    ComponentKind::Video => video(),
    ComponentKind::Slider => slider(),
    ComponentKind::TrainingPrograms => training_programs(),
    ComponentKind::TrainingModules => modules(),
    ComponentKind::SupportPlans => plans(),
    ComponentKind::Unknown(_) => return None,
  };
  Some(html)
}

#[cfg(test)]
mod tests {
  use pagewright_injector::check_template;

  use super::*;

  #[test]
  fn every_known_kind_has_a_balanced_template() {
    for kind in ComponentKind::KNOWN {
      let html = builtin(kind).unwrap_or_default();
      assert!(!html.is_empty(), "{kind} has no template");
      assert!(check_template(&html).is_empty(), "{kind}: {:?}", check_template(&html));
    }
  }

  #[test]
  fn unknown_kind_has_no_template() {
    assert!(builtin(&ComponentKind::Unknown("Mystery".into())).is_none());
  }
}
