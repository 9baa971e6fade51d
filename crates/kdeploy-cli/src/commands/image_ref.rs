use kdeploy_core::format_image_reference;

pub fn image_ref(registry: &str, prefix: &str, service: &str, version: &str) {
    println!(
        "{}",
        format_image_reference(registry, prefix, service, version)
    );
}
