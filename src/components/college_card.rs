//! College Card Component
//!
//! Directory card used by the colleges page and the featured row on
//! the home page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::models::College;

fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[component]
pub fn CollegeCard(college: College) -> impl IntoView {
    let href = format!("/colleges/{}", college.id);

    view! {
        <div class="college-card">
            <div class="college-head">
                <h3>{college.name.clone()}</h3>
                <Show when={let featured = college.is_featured; move || featured}>
                    <span class="featured-badge">"Featured"</span>
                </Show>
            </div>
            <p class="college-location">{college.location.clone()}</p>
            <p class="college-rating" title=format!("{:.1} / 5", college.rating)>
                {stars(college.rating)}
            </p>
            <p class="college-affiliation">{college.affiliation.clone()}</p>
            <A href=href attr:class="college-link">"View details"</A>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_rounding() {
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(3.4), "★★★☆☆");
        assert_eq!(stars(3.5), "★★★★☆");
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(7.2), "★★★★★");
    }
}
