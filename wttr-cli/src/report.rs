use wttr_core::WeatherReport;

/// Render the multi-line console report.
///
/// The extracted strings are interpolated verbatim; only the city name is
/// title-cased for the heading.
pub fn render(city: &str, weather: &WeatherReport) -> String {
    format!(
        "☁️ Погода в {}:\n\
         🌡️  Температура: {}°C\n\
         📝 Описание: {}\n\
         💨 Ветер: {} км/ч\n\
         💧 Влажность: {}%\n\
         📈 Давление: {} мбар\n\
         👁️  Видимость: {} км",
        title_case(city),
        weather.temperature_c,
        weather.description,
        weather.windspeed_kmph,
        weather.humidity_pct,
        weather.pressure_mbar,
        weather.visibility_km,
    )
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
/// Unicode-aware, so Cyrillic city names work.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;

    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            temperature_c: "5".to_string(),
            description: "Пасмурно".to_string(),
            windspeed_kmph: "13".to_string(),
            humidity_pct: "81".to_string(),
            pressure_mbar: "1015".to_string(),
            visibility_km: "10".to_string(),
        }
    }

    #[test]
    fn renders_fields_verbatim() {
        let rendered = render("Москва", &sample_report());

        assert!(rendered.starts_with("☁️ Погода в Москва:\n"));
        assert!(rendered.contains("🌡️  Температура: 5°C"));
        assert!(rendered.contains("📝 Описание: Пасмурно"));
        assert!(rendered.contains("💨 Ветер: 13 км/ч"));
        assert!(rendered.contains("💧 Влажность: 81%"));
        assert!(rendered.contains("📈 Давление: 1015 мбар"));
        assert!(rendered.contains("👁️  Видимость: 10 км"));
    }

    #[test]
    fn heading_title_cases_the_city() {
        let rendered = render("новосибирск", &sample_report());
        assert!(rendered.starts_with("☁️ Погода в Новосибирск:\n"));
    }

    #[test]
    fn title_case_handles_multiple_words() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("улан-удэ"), "Улан-Удэ");
    }

    #[test]
    fn title_case_lowercases_the_tail() {
        assert_eq!(title_case("МОСКВА"), "Москва");
    }

    #[test]
    fn title_case_leaves_non_alphabetic_input_alone() {
        assert_eq!(title_case("123"), "123");
        assert_eq!(title_case(""), "");
    }
}
